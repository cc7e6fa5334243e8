//! Axum router configuration with middleware.
//!
//! All service routes live under `/api/`; the banner and health check
//! sit at the root. Middleware: CORS (any origin) and request tracing.

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Chat
        .route("/api/chat", post(handlers::chat::chat))
        // Session lifecycle
        .route("/api/session/new", post(handlers::session::create_session))
        .route("/api/session/{id}/info", get(handlers::session::session_info))
        .route("/api/session/{id}", delete(handlers::session::delete_session))
        .route("/api/sessions", get(handlers::session::list_sessions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Service banner.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Tellerchain Bank Assistant API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

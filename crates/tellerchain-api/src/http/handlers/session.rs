//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/session/new       - Create a session
//! - GET    /api/session/{id}/info - Session summary
//! - DELETE /api/session/{id}      - Delete a session
//! - GET    /api/sessions          - List live session ids

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use tellerchain_core::registry::GREETING;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub message: String,
    /// The greeting already sitting on the new session's transcript,
    /// for clients that render it without a round trip.
    pub initial_message: String,
}

/// POST /api/session/new - Create a fresh session.
pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreated> {
    let (session_id, _session) = state.registry.create();

    Json(SessionCreated {
        session_id,
        message: "New session created".to_string(),
        initial_message: GREETING.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub message_count: usize,
    /// Locked category, or `null` while the chain is still deciding.
    pub category: Option<String>,
}

/// GET /api/session/{id}/info - Message count and locked category.
pub async fn session_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionInfo>, AppError> {
    let session = state
        .registry
        .get(&session_id)
        .ok_or(AppError::SessionNotFound)?;
    let session = session.lock().await;

    Ok(Json(SessionInfo {
        session_id: session.id.clone(),
        message_count: session.message_count(),
        category: session.selected_category.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionDeleted {
    pub message: String,
}

/// DELETE /api/session/{id} - Drop a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionDeleted>, AppError> {
    if !state.registry.delete(&session_id) {
        return Err(AppError::SessionNotFound);
    }

    Ok(Json(SessionDeleted {
        message: "Session deleted".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionList {
    pub active_sessions: usize,
    pub session_ids: Vec<String>,
}

/// GET /api/sessions - Count and ids of live sessions.
pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionList> {
    let session_ids = state.registry.ids();

    Json(SessionList {
        active_sessions: session_ids.len(),
        session_ids,
    })
}

//! Application error type mapping to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Application-level error that maps to HTTP responses.
///
/// Turn processing itself never errors (backend failures become normal
/// replies), so this only covers lookups against the registry.
#[derive(Debug)]
pub enum AppError {
    /// The referenced session does not exist.
    SessionNotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Session not found"),
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_maps_to_404() {
        let response = AppError::SessionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

//! Route handlers.

pub mod forms;
pub mod pages;
pub mod sessions;

use axum::http::StatusCode;
use flock_core::FlockError;

/// Map an engine error onto an HTTP error response.
pub(crate) fn api_error(e: FlockError) -> (StatusCode, String) {
    let status = match &e {
        FlockError::FormNotFound(_) | FlockError::FieldNotFound(_) => StatusCode::NOT_FOUND,
        FlockError::InvalidTransition { .. } => StatusCode::CONFLICT,
        FlockError::NoRemoteOptions(_) | FlockError::ValidationError(_) => StatusCode::BAD_REQUEST,
        FlockError::OptionLookup(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

pub(crate) fn session_not_found(id: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Session not found: {}", id))
}

//! Error types for the status server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::replay::ReplayError;

/// Errors returned by status routes.
#[derive(Debug, Error)]
pub enum StatusError {
    /// A replay is already in progress.
    #[error("a replay is already running")]
    ReplayRunning,

    /// No replay data was loaded at startup.
    #[error("replay data is not available")]
    ReplayUnavailable,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ReplayError> for StatusError {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::AlreadyRunning => StatusError::ReplayRunning,
            other => StatusError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let status = match &self {
            StatusError::ReplayRunning => StatusCode::CONFLICT,
            StatusError::ReplayUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            StatusError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for status routes.
pub type Result<T> = std::result::Result<T, StatusError>;

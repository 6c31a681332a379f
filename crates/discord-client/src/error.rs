//! Error types for discord-client.

use thiserror::Error;

/// Errors that can occur when talking to the Discord REST API.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with an error status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API asked us to slow down.
    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: f64 },

    /// The bot token was rejected.
    #[error("Unauthorized: check the bot token")]
    Unauthorized,

    /// Health check failed.
    #[error("Health check failed")]
    HealthCheckFailed,
}

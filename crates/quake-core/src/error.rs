//! Error types for notification delivery.

use thiserror::Error;

/// Errors a notification sink can report.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The destination rejected or failed to accept the notification.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// The sink is not usable right now.
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

//! Error types for feed-listener.

use thiserror::Error;

/// Errors raised while receiving records from a feed.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Connect failed or the socket broke mid-stream.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame was not a JSON object.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote side closed the stream.
    #[error("Stream closed")]
    Closed,

    /// The record handler panicked.
    #[error("Handler panicked on feed {0}")]
    HandlerPanicked(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for ListenerError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ListenerError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ListenerError {
    fn from(e: serde_json::Error) -> Self {
        ListenerError::Decode(e.to_string())
    }
}

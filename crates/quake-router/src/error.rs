//! Error types for quake-router.

use quake_core::SinkError;
use thiserror::Error;

/// Errors that can occur while routing a record.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Publishing the rendered notification failed.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Unrecognized early-warning filter value.
    #[error("invalid early-warning filter: {0}")]
    InvalidFilter(String),
}

//! Record handler trait.

use async_trait::async_trait;
use serde_json::Value;

/// Error returned by a handler. Logged by the connection loop, never fatal.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Consumes decoded records from one feed.
///
/// Records are delivered one at a time in arrival order; the next record is
/// not read until `handle` returns.
#[async_trait]
pub trait RecordHandler: Send + Sync {
    async fn handle(&self, record: Value) -> Result<(), HandlerError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

//! Delayed sink - wraps another sink with artificial delay.

use std::time::Duration;

use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};
use tokio::time::sleep;

/// A sink that waits before delegating to another sink.
///
/// Useful for checking that a slow delivery backpressures the feed loop.
pub struct DelayedSink<S: NotificationSink> {
    inner: S,
    delay: Duration,
}

impl<S: NotificationSink> DelayedSink<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn with_millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<S: NotificationSink> NotificationSink for DelayedSink<S> {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        sleep(self.delay).await;
        self.inner.publish(notification).await
    }

    fn name(&self) -> &str {
        "DelayedSink"
    }
}

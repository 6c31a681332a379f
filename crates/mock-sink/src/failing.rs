//! Failing sink - simulates delivery errors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};

use crate::recording::RecordingSink;

/// A sink that fails the first `failures` deliveries, then records the rest.
#[derive(Debug, Clone)]
pub struct FailingSink {
    remaining: Arc<AtomicUsize>,
    delivered: RecordingSink,
}

impl FailingSink {
    /// Fail every delivery.
    pub fn always() -> Self {
        Self::times(usize::MAX)
    }

    /// Fail the first `failures` deliveries.
    pub fn times(failures: usize) -> Self {
        Self {
            remaining: Arc::new(AtomicUsize::new(failures)),
            delivered: RecordingSink::new(),
        }
    }

    /// Notifications that got through.
    pub fn delivered(&self) -> &RecordingSink {
        &self.delivered
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        let failed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(SinkError::DeliveryFailed(format!(
                "simulated failure for {}",
                notification.title
            )));
        }
        self.delivered.publish(notification).await
    }

    fn name(&self) -> &str {
        "FailingSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> RenderedNotification {
        RenderedNotification {
            title: "t".to_string(),
            body: String::new(),
            fields: Vec::new(),
            color: 0,
            image: None,
            footer: String::new(),
            silent: false,
        }
    }

    #[tokio::test]
    async fn test_fails_then_recovers() {
        let sink = FailingSink::times(1);
        assert!(sink.publish(&notification()).await.is_err());
        assert!(sink.publish(&notification()).await.is_ok());
        assert_eq!(sink.delivered().len(), 1);
    }

    #[tokio::test]
    async fn test_always_fails() {
        let sink = FailingSink::always();
        for _ in 0..3 {
            assert!(sink.publish(&notification()).await.is_err());
        }
        assert!(sink.delivered().is_empty());
    }
}

//! Recording sink - keeps published notifications in memory.

use std::sync::{Arc, Mutex};

use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};

/// A sink that records every notification it receives.
///
/// Clones share the same storage, so a clone can be handed to a router
/// while the test keeps the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    published: Arc<Mutex<Vec<RenderedNotification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in delivery order.
    pub fn published(&self) -> Vec<RenderedNotification> {
        self.lock().clone()
    }

    /// Titles of everything published so far.
    pub fn titles(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RenderedNotification>> {
        // A panicking test thread must not hide earlier records
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        self.lock().push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingSink"
    }
}

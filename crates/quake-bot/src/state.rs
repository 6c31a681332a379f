//! Application state shared across tasks and handlers.

use std::sync::Arc;
use std::time::Duration;

use feed_listener::{ConnectionStatus, StatusHandle};
use serde::Serialize;
use tokio::time::Instant;

use crate::presence::Presence;
use crate::replay::ReplayDriver;

/// Read-only status of one feed.
#[derive(Debug, Clone)]
pub struct FeedStatus {
    pub name: String,
    pub url: String,
    pub handle: StatusHandle,
}

/// Point-in-time view of one feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub name: String,
    pub url: String,
    pub status: ConnectionStatus,
}

impl FeedStatus {
    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            name: self.name.clone(),
            url: self.url.clone(),
            status: self.handle.current(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feeds: Arc<Vec<FeedStatus>>,
    pub presence: Presence,
    /// `None` when no replay data could be loaded.
    pub replay: Option<Arc<ReplayDriver>>,
    pub started: Instant,
    pub version: &'static str,
}

impl AppState {
    pub fn new(
        feeds: Vec<FeedStatus>,
        presence: Presence,
        replay: Option<Arc<ReplayDriver>>,
    ) -> Self {
        Self {
            feeds: Arc::new(feeds),
            presence,
            replay,
            started: Instant::now(),
            version: crate::version(),
        }
    }

    pub fn snapshots(&self) -> Vec<FeedSnapshot> {
        self.feeds.iter().map(FeedStatus::snapshot).collect()
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

//! Liveness endpoint with a feed connectivity summary.

use axum::extract::State;
use axum::Json;
use feed_listener::ConnectionStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    /// `ok` when every feed is connected, `degraded` otherwise.
    pub status: &'static str,
    pub connected_feeds: usize,
    pub total_feeds: usize,
    pub version: &'static str,
}

/// Always answers 200 while the process is up.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let connected_feeds = state
        .feeds
        .iter()
        .filter(|feed| feed.handle.current() == ConnectionStatus::Connected)
        .count();
    let total_feeds = state.feeds.len();

    Json(Health {
        status: if connected_feeds == total_feeds {
            "ok"
        } else {
            "degraded"
        },
        connected_feeds,
        total_feeds,
        version: state.version,
    })
}

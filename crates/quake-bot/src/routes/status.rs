//! Feed status endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::{AppState, FeedSnapshot};

/// Current bot status.
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub uptime_secs: u64,
    pub presence: String,
    pub feeds: Vec<FeedSnapshot>,
    pub replay_running: bool,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: state.version,
        uptime_secs: state.uptime().as_secs(),
        presence: state.presence.current(),
        feeds: state.snapshots(),
        replay_running: state.replay.as_ref().is_some_and(|r| r.is_running()),
    })
}

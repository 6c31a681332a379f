//! Replay trigger endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, StatusError};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReplayStarted {
    pub status: &'static str,
    pub records: usize,
}

/// Start a replay in the background. Rejected while one is running.
pub async fn start_replay(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ReplayStarted>)> {
    let driver = state.replay.as_ref().ok_or(StatusError::ReplayUnavailable)?;
    let handle = driver.start()?;
    info!(records = driver.len(), "Replay requested over HTTP");

    tokio::spawn(async move {
        match handle.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(error = %e, "Replay failed"),
            Err(e) => warn!(error = %e, "Replay task aborted"),
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(ReplayStarted {
            status: "started",
            records: driver.len(),
        }),
    ))
}

//! Route handlers for the status server.

pub mod health;
pub mod replay;
pub mod status;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/status", get(status::status))
        .route("/replay", post(replay::start_replay))
}

//! Earthquake and tsunami alert relay bot.
//!
//! Wires two feed connections to their routers, publishes through a
//! presence-tracking sink and exposes a small HTTP status surface.

pub mod config;
pub mod error;
pub mod presence;
pub mod replay;
pub mod routes;
pub mod sampler;
pub mod state;
pub mod supervise;

use axum::Router;

use crate::state::AppState;

/// Status server application with state attached.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

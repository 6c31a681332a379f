//! Event routers for the quake alert relay.
//!
//! Each upstream feed has a [`FeedSchema`] that turns a decoded JSON record
//! into a [`Routed`] outcome. A [`Router`] applies the early-warning
//! [`EewFilter`], formats the event and publishes it through a
//! [`quake_core::NotificationSink`].
//!
//! # Example
//!
//! ```rust
//! use quake_core::{Formatter, NotificationSink, RenderedNotification, SinkError, async_trait};
//! use quake_router::{EewFilter, WolfxEewRouter};
//! use serde_json::json;
//!
//! struct Stdout;
//!
//! #[async_trait]
//! impl NotificationSink for Stdout {
//!     async fn publish(&self, n: &RenderedNotification) -> Result<(), SinkError> {
//!         println!("{}", n.title);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "stdout"
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let router = WolfxEewRouter::new(Stdout, Formatter::default(), EewFilter::All);
//! let published = router
//!     .route(&json!({"type": "jma_eew", "Serial": "1", "isWarn": true, "MaxIntensity": "4"}))
//!     .await
//!     .unwrap();
//! assert_eq!(published.unwrap().title, "緊急地震速報（警報）第1報");
//! # }
//! ```

pub mod extract;

mod error;
mod filter;
mod p2pquake;
mod router;
mod wolfx;

pub use error::RouterError;
pub use filter::EewFilter;
pub use p2pquake::{P2pQuake, CODE_EEW, CODE_QUAKE, CODE_TSUNAMI};
pub use router::{FeedSchema, Routed, Router, DEFAULT_SOURCE_LABEL};
pub use wolfx::{WolfxEew, TYPE_JMA_EEW};

/// Router for the P2PQuake feed.
pub type P2pQuakeRouter<S> = Router<P2pQuake, S>;

/// Router for the Wolfx early-warning feed.
pub type WolfxEewRouter<S> = Router<WolfxEew, S>;

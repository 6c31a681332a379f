//! Feed connection manager for the quake alert relay.
//!
//! A [`FeedConnection`] keeps one upstream feed connected, decodes each frame
//! into a JSON object and hands it to a [`RecordHandler`]. Failures never
//! stop the loop: the connection waits a flat delay and reconnects.
//!
//! # Example
//!
//! ```no_run
//! use feed_listener::{async_trait, FeedConnection, HandlerError, RecordHandler, WsConnector};
//! use serde_json::Value;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl RecordHandler for Printer {
//!     async fn handle(&self, record: Value) -> Result<(), HandlerError> {
//!         println!("{}", record);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "printer"
//!     }
//! }
//!
//! # async fn example() {
//! let feed = FeedConnection::new("wolfx", "wss://ws-api.wolfx.jp/jma_eew", WsConnector);
//! feed.run(&Printer).await;
//! # }
//! ```

mod connection;
mod error;
mod handler;
mod reconnect;
mod status;
mod transport;

pub use connection::{decode_record, FeedConnection};
pub use error::ListenerError;
pub use handler::{HandlerError, RecordHandler};
pub use reconnect::{ReconnectConfig, DEFAULT_RECONNECT_DELAY};
pub use status::{ConnectionStatus, StatusCell, StatusHandle};
pub use transport::{Connector, FrameStream, WsConnector};

pub use async_trait::async_trait;

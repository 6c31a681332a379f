//! Mock notification sinks for quake alert routing.
//!
//! This crate provides `NotificationSink` implementations for tests and
//! dry runs:
//! - `RecordingSink` - Keeps every published notification in memory
//! - `FailingSink` - Fails a configurable number of deliveries
//! - `DelayedSink` - Wraps another sink with artificial delay
//! - `LoggingSink` - Logs notifications instead of delivering them
//!
//! # Example
//!
//! ```rust
//! use mock_sink::{NotificationSink, RecordingSink};
//! use quake_core::{Formatter, QuakeEvent, QuakeReport, ReportHeader, Hypocenter, RawIntensity};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sink = RecordingSink::new();
//!     let event = QuakeEvent::Other(QuakeReport {
//!         header: ReportHeader { source_label: "気象庁".into(), occurrence_time: None },
//!         hypocenter: Hypocenter::unknown(),
//!         max_intensity: RawIntensity::Unknown,
//!         tsunami: None,
//!     });
//!
//!     sink.publish(&Formatter::default().render(&event)).await.unwrap();
//!     assert_eq!(sink.titles(), vec!["🌍 地震情報".to_string()]);
//! }
//! ```

mod delayed;
mod failing;
mod logging;
mod recording;

// Re-export quake-core types for convenience
pub use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};

pub use delayed::DelayedSink;
pub use failing::FailingSink;
pub use logging::LoggingSink;
pub use recording::RecordingSink;

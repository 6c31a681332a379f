//! Core types for the quake alert relay.
//!
//! This crate is shared by every feed router and sink. It defines:
//!
//! - [`QuakeEvent`] - a normalized seismic information update (9 kinds)
//! - [`classify`] - the intensity classifier for both upstream scales
//! - [`Formatter`] - renders events into [`RenderedNotification`]s
//! - [`NotificationSink`] - the trait every delivery backend implements
//!
//! # Example
//!
//! ```rust
//! use quake_core::{
//!     Depth, FormatOptions, Formatter, Hypocenter, QuakeEvent, QuakeReport, RawIntensity,
//!     ReportHeader,
//! };
//!
//! let event = QuakeEvent::DetailedInfo(QuakeReport {
//!     header: ReportHeader {
//!         source_label: "気象庁".to_string(),
//!         occurrence_time: Some("2024/01/01 16:10:00".to_string()),
//!     },
//!     hypocenter: Hypocenter {
//!         name: Some("石川県能登地方".to_string()),
//!         magnitude: Some(7.6),
//!         depth: Depth::from_km(10),
//!     },
//!     max_intensity: RawIntensity::Observed(70),
//!     tsunami: None,
//! });
//!
//! let notification = Formatter::new(FormatOptions::default()).render(&event);
//! assert_eq!(notification.title, "🌍 地震情報");
//! ```

mod error;
mod event;
mod format;
mod intensity;
mod notification;
mod tsunami;

pub use error::SinkError;
pub use event::{
    Accuracy, AreaArrival, Depth, EarlyWarning, EewCancellation, EruptionReport, EventKind,
    Hypocenter, IntensityPoint, IntensityReport, QuakeEvent, QuakeReport, ReportHeader,
    TsunamiArea, TsunamiReport, UNKNOWN,
};
pub use format::{
    is_deep_focus, FormatOptions, Formatter, ASSUMED_HYPOCENTER_CLAUSE, DEEP_FOCUS_CLAUSE,
    DEEP_FOCUS_THRESHOLD_KM, FIELD_VALUE_LIMIT, SPECIAL_WARNING_CLAUSE, TEST_DATA_BANNER,
    TEST_DATA_TITLE_PREFIX,
};
pub use intensity::{classify, Classification, IntensityBand, RawIntensity, BANDS};
pub use notification::{EmbedField, NotificationSink, RenderedNotification};
pub use tsunami::{TsunamiGrade, TsunamiStatus};

// Re-export async_trait for sink implementations
pub use async_trait::async_trait;

//! Generic feed router.

use std::marker::PhantomData;

use async_trait::async_trait;
use feed_listener::{HandlerError, RecordHandler};
use quake_core::{EewCancellation, Formatter, NotificationSink, QuakeEvent, RenderedNotification};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RouterError;
use crate::filter::EewFilter;

/// Source label used when a record does not name its issuer.
pub const DEFAULT_SOURCE_LABEL: &str = "気象庁";

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// A report to format and publish.
    Event(QuakeEvent),
    /// An early warning was withdrawn.
    Cancel(EewCancellation),
    /// Not something this feed publishes; carries the reason for logs.
    Ignored(String),
}

/// How one upstream feed's records map to events.
pub trait FeedSchema: Send + Sync + 'static {
    fn name() -> &'static str;

    /// Pure mapping from a decoded record. Never fails; missing fields
    /// become unknown values.
    fn normalize(record: &Value) -> Routed;
}

/// Routes records of one feed to a notification sink.
pub struct Router<F: FeedSchema, S: NotificationSink> {
    sink: S,
    formatter: Formatter,
    filter: EewFilter,
    _feed: PhantomData<F>,
}

impl<F: FeedSchema, S: NotificationSink> Router<F, S> {
    pub fn new(sink: S, formatter: Formatter, filter: EewFilter) -> Self {
        Self {
            sink,
            formatter,
            filter,
            _feed: PhantomData,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn filter(&self) -> EewFilter {
        self.filter
    }

    pub fn normalize(&self, record: &Value) -> Routed {
        F::normalize(record)
    }

    /// Normalize, filter, format and publish one record.
    ///
    /// Returns the published notification, or `None` when the record was
    /// ignored or filtered out. Filtered early warnings are never formatted.
    pub async fn route(&self, record: &Value) -> Result<Option<RenderedNotification>, RouterError> {
        let notification = match self.normalize(record) {
            Routed::Ignored(reason) => {
                debug!(source = F::name(), "Ignoring record: {}", reason);
                return Ok(None);
            }
            Routed::Cancel(cancel) => {
                if !self.filter.allows_cancellation() {
                    debug!(source = F::name(), "Early-warning cancellation filtered out");
                    return Ok(None);
                }
                self.formatter.format_cancellation(&cancel)
            }
            Routed::Event(event) => {
                if let QuakeEvent::EarlyWarning(warning) = &event {
                    if !self.filter.allows(warning.is_warning) {
                        debug!(
                            source = F::name(),
                            filter = ?self.filter,
                            serial = ?warning.serial,
                            "Early warning filtered out"
                        );
                        return Ok(None);
                    }
                }
                self.formatter.render(&event)
            }
        };

        self.sink.publish(&notification).await?;
        info!(
            source = F::name(),
            sink = self.sink.name(),
            "Published {}", notification.title
        );
        Ok(Some(notification))
    }
}

#[async_trait]
impl<F: FeedSchema, S: NotificationSink> RecordHandler for Router<F, S> {
    async fn handle(&self, record: Value) -> Result<(), HandlerError> {
        self.route(&record).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        F::name()
    }
}

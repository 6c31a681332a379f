//! Rendered notifications and the sink they are published to.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SinkError;

/// One name/value entry of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// A notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNotification {
    pub title: String,
    pub body: String,
    pub fields: Vec<EmbedField>,
    pub color: u32,
    /// Image tag to attach as thumbnail, e.g. `shindo5.png`.
    pub image: Option<String>,
    pub footer: String,
    /// Deliver without triggering a push notification.
    pub silent: bool,
}

impl RenderedNotification {
    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Destination that notifications are published to.
///
/// Implementations must tolerate concurrent calls: both feeds publish
/// independently.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        (**self).publish(notification).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

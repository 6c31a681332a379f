//! Connection loop for one feed.

use std::panic::AssertUnwindSafe;

use futures::{FutureExt, StreamExt};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::ListenerError;
use crate::handler::RecordHandler;
use crate::reconnect::ReconnectConfig;
use crate::status::{ConnectionStatus, StatusCell, StatusHandle};
use crate::transport::Connector;

/// Decode one frame into a JSON object record.
pub fn decode_record(text: &str) -> Result<Value, ListenerError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ListenerError::Decode("frame is not a JSON object".to_string()));
    }
    Ok(value)
}

/// Keeps one feed connected and hands its records to a handler.
pub struct FeedConnection<C: Connector> {
    name: String,
    url: String,
    connector: C,
    reconnect: ReconnectConfig,
    status: StatusCell,
}

impl<C: Connector> FeedConnection<C> {
    pub fn new(name: impl Into<String>, url: impl Into<String>, connector: C) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            connector,
            reconnect: ReconnectConfig::default(),
            status: StatusCell::new(),
        }
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusHandle {
        self.status.handle()
    }

    /// Connect and process records forever.
    ///
    /// Every failure moves through `Error` and `Reconnecting`, waits the
    /// configured delay, and tries again. This future never completes.
    pub async fn run<H>(&self, handler: &H)
    where
        H: RecordHandler + ?Sized,
    {
        info!(source = %self.name, handler = handler.name(), "Starting feed connection to {}", self.url);
        self.status.set(ConnectionStatus::Connecting);

        loop {
            let err = self.session(handler).await;
            warn!(source = %self.name, error = %err, "Feed connection lost");

            self.status.set(ConnectionStatus::Error);
            self.status.set(ConnectionStatus::Reconnecting);
            info!(
                source = %self.name,
                "Reconnecting in {:?}", self.reconnect.delay
            );
            sleep(self.reconnect.delay).await;
        }
    }

    /// Run one connection until it fails, returning the reason.
    async fn session<H>(&self, handler: &H) -> ListenerError
    where
        H: RecordHandler + ?Sized,
    {
        let mut frames = match self.connector.connect(&self.url).await {
            Ok(frames) => frames,
            Err(e) => return e,
        };
        self.status.set(ConnectionStatus::Connected);
        info!(source = %self.name, "Connected to {}", self.url);

        while let Some(frame) = frames.next().await {
            let text = match frame {
                Ok(text) => text,
                Err(e) => return e,
            };

            let record = match decode_record(&text) {
                Ok(record) => record,
                Err(e) => {
                    warn!(source = %self.name, error = %e, "Skipping undecodable frame");
                    debug!("Raw frame: {}", text);
                    continue;
                }
            };

            match AssertUnwindSafe(handler.handle(record)).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(source = %self.name, error = %e, "Handler failed, continuing");
                }
                Err(_) => {
                    error!(source = %self.name, "Handler panicked, dropping connection");
                    return ListenerError::HandlerPanicked(self.name.clone());
                }
            }
        }

        ListenerError::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_record() {
        assert!(decode_record(r#"{"code":551}"#).unwrap().is_object());
        assert!(matches!(decode_record("[1,2]"), Err(ListenerError::Decode(_))));
        assert!(matches!(decode_record("nope"), Err(ListenerError::Decode(_))));
        assert!(matches!(decode_record("\"text\""), Err(ListenerError::Decode(_))));
    }
}

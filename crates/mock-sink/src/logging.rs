//! Logging sink - logs notifications instead of delivering them.

use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};

/// A sink for dry runs that writes each notification to the log.
#[derive(Debug, Clone, Default)]
pub struct LoggingSink;

#[async_trait]
impl NotificationSink for LoggingSink {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        let fields: Vec<String> = notification
            .fields
            .iter()
            .map(|f| format!("{}={}", f.name, f.value.replace('\n', " / ")))
            .collect();
        tracing::info!(
            title = %notification.title,
            color = format_args!("{:#08x}", notification.color),
            image = ?notification.image,
            silent = notification.silent,
            "[dry-run] {} | {}",
            notification.body.replace('\n', " "),
            fields.join(", ")
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "LoggingSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_sink() {
        let sink = LoggingSink;
        let notification = RenderedNotification {
            title: "t".to_string(),
            body: "line1\nline2".to_string(),
            fields: Vec::new(),
            color: 0xff0000,
            image: None,
            footer: String::new(),
            silent: false,
        };
        // Should not error
        sink.publish(&notification).await.unwrap();
    }
}

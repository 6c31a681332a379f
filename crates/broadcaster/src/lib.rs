//! Broadcast utilities for the quake alert relay.
//!
//! This crate delivers [`RenderedNotification`]s to the configured Discord
//! channel. Image tags are resolved against a local directory and uploaded
//! as the embed thumbnail.
//!
//! # Example
//!
//! ```no_run
//! use broadcaster::Broadcaster;
//! use discord_client::DiscordConfig;
//! use quake_core::{NotificationSink, RenderedNotification};
//!
//! # async fn example(notification: RenderedNotification) -> Result<(), broadcaster::Error> {
//! let config = DiscordConfig::new("bot-token", 123456789012345678);
//! let broadcaster = Broadcaster::connect(config, "images").await?;
//!
//! broadcaster.publish(&notification).await.ok();
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use discord_client::{
    CreateMessage, DiscordClient, DiscordConfig, DiscordError, Embed, FileUpload, MessageResponse,
};
use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};
use thiserror::Error;
use tracing::{info, warn};

/// Longest rate-limit pause honoured before giving up on a notification.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(10);

/// Errors that can occur during broadcast operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Discord communication error.
    #[error("Discord error: {0}")]
    Discord(#[from] DiscordError),
}

impl From<Error> for SinkError {
    fn from(error: Error) -> Self {
        SinkError::DeliveryFailed(error.to_string())
    }
}

/// A broadcaster for posting notifications to one channel.
#[derive(Clone, Debug)]
pub struct Broadcaster {
    client: DiscordClient,
    image_dir: PathBuf,
}

impl Broadcaster {
    /// Verify the token and create a broadcaster.
    pub async fn connect(
        config: DiscordConfig,
        image_dir: impl Into<PathBuf>,
    ) -> Result<Self, Error> {
        let client = DiscordClient::connect(config).await?;
        info!("Broadcaster connected to Discord");
        Ok(Self::with_client(client, image_dir))
    }

    /// Create a broadcaster around an existing client.
    pub fn with_client(client: DiscordClient, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            image_dir: image_dir.into(),
        }
    }

    /// Send a notification, uploading its image when the file exists.
    pub async fn send(
        &self,
        notification: &RenderedNotification,
    ) -> Result<MessageResponse, Error> {
        let image = match &notification.image {
            Some(tag) => self.load_image(tag).await,
            None => None,
        };
        let message = to_message(notification, image.as_ref().map(|f| f.filename.as_str()));

        match self.send_once(&message, image.clone()).await {
            Err(Error::Discord(DiscordError::RateLimited { retry_after })) => {
                let wait = Duration::from_secs_f64(retry_after.max(0.0)).min(MAX_RATE_LIMIT_WAIT);
                warn!(?wait, "Rate limited, retrying once");
                tokio::time::sleep(wait).await;
                self.send_once(&message, image).await
            }
            other => other,
        }
    }

    /// Get the underlying DiscordClient.
    pub fn client(&self) -> &DiscordClient {
        &self.client
    }

    /// Check if the last API call succeeded.
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    async fn send_once(
        &self,
        message: &CreateMessage,
        image: Option<FileUpload>,
    ) -> Result<MessageResponse, Error> {
        let result = match image {
            Some(file) => self.client.send_message_with_file(message, file).await,
            None => self.client.send_message(message).await,
        };
        result.map_err(Error::from)
    }

    async fn load_image(&self, tag: &str) -> Option<FileUpload> {
        let path = image_path(&self.image_dir, tag);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(FileUpload::png(tag, bytes)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Image not available, sending without thumbnail");
                None
            }
        }
    }
}

#[async_trait]
impl NotificationSink for Broadcaster {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        let sent = self.send(notification).await?;
        info!(message_id = %sent.id, title = %notification.title, "Notification delivered");
        Ok(())
    }

    fn name(&self) -> &str {
        "discord"
    }
}

/// Resolve an image tag inside the image directory, ignoring any path components in the tag.
fn image_path(dir: &Path, tag: &str) -> PathBuf {
    let file_name = Path::new(tag)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    dir.join(file_name)
}

/// Build the API message for a notification.
///
/// `attachment` is the uploaded file name, if the image could be loaded.
pub fn to_message(notification: &RenderedNotification, attachment: Option<&str>) -> CreateMessage {
    let mut embed = Embed::new(&notification.title, notification.color)
        .with_description(&notification.body)
        .with_footer(&notification.footer);
    for field in &notification.fields {
        embed = embed.with_field(&field.name, &field.value, field.inline);
    }
    if let Some(filename) = attachment {
        embed = embed.with_attachment_thumbnail(filename);
    }

    let mut message = CreateMessage::embed(embed.clamped());
    if let Some(filename) = attachment {
        message = message.with_attachment(filename);
    }
    if notification.silent {
        message = message.silent();
    }
    message
}

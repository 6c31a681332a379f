//! Discord REST API client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};

use crate::config::DiscordConfig;
use crate::error::DiscordError;
use crate::types::{ApiErrorBody, CreateMessage, CurrentUser, FileUpload, MessageResponse};

/// Client for posting messages to the configured channel.
#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    config: DiscordConfig,
    connected: Arc<AtomicBool>,
}

impl DiscordClient {
    /// Create a client without contacting the API.
    pub fn new(config: DiscordConfig) -> Result<Self, DiscordError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                "DiscordBot (https://github.com/quake-relay, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()
            .map_err(DiscordError::Http)?;

        Ok(Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a client and verify the token against the API.
    pub async fn connect(config: DiscordConfig) -> Result<Self, DiscordError> {
        let client = Self::new(config)?;

        if client.health_check().await? {
            info!(
                channel_id = client.config.channel_id,
                "Connected to Discord API at {}", client.config.api_base
            );
        } else {
            return Err(DiscordError::HealthCheckFailed);
        }

        Ok(client)
    }

    /// Check if the last API call succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Perform a health check by fetching the bot user.
    pub async fn health_check(&self) -> Result<bool, DiscordError> {
        match self.current_user().await {
            Ok(user) => {
                debug!("Health check OK as {}", user.username);
                Ok(true)
            }
            Err(DiscordError::Unauthorized) => Err(DiscordError::Unauthorized),
            Err(DiscordError::Api { status, message }) => {
                warn!("Health check returned {}: {}", status, message);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the authenticated bot user.
    pub async fn current_user(&self) -> Result<CurrentUser, DiscordError> {
        let request = self.http.get(self.config.current_user_url());
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Post a message to the configured channel.
    pub async fn send_message(
        &self,
        message: &CreateMessage,
    ) -> Result<MessageResponse, DiscordError> {
        debug!(
            channel_id = self.config.channel_id,
            silent = message.is_silent(),
            "Posting message"
        );
        let request = self.http.post(self.config.messages_url()).json(message);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Post a message with one uploaded file.
    ///
    /// The message should declare the file with
    /// [`CreateMessage::with_attachment`] so embeds can reference it as
    /// `attachment://<filename>`.
    pub async fn send_message_with_file(
        &self,
        message: &CreateMessage,
        file: FileUpload,
    ) -> Result<MessageResponse, DiscordError> {
        debug!(
            channel_id = self.config.channel_id,
            file = %file.filename,
            "Posting message with attachment"
        );
        let payload = serde_json::to_string(message)?;
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)
            .map_err(DiscordError::Http)?;
        let form = Form::new()
            .text("payload_json", payload)
            .part("files[0]", part);

        let request = self.http.post(self.config.messages_url()).multipart(form);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &DiscordConfig {
        &self.config
    }

    /// Get the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Attach auth, send, and map error statuses.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, DiscordError> {
        let response = request
            .header("Authorization", self.config.authorization())
            .send()
            .await
            .map_err(|e| {
                self.connected.store(false, Ordering::SeqCst);
                DiscordError::Http(e)
            })?;

        let status = response.status();
        if status.is_success() {
            self.connected.store(true, Ordering::SeqCst);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: Option<ApiErrorBody> = serde_json::from_str(&body).ok();

        match status {
            StatusCode::UNAUTHORIZED => {
                self.connected.store(false, Ordering::SeqCst);
                Err(DiscordError::Unauthorized)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = parsed.and_then(|b| b.retry_after).unwrap_or(1.0);
                warn!("Rate limited, retry after {}s", retry_after);
                Err(DiscordError::RateLimited { retry_after })
            }
            _ => Err(DiscordError::Api {
                status: status.as_u16(),
                message: parsed.map(|b| b.message).unwrap_or(body),
            }),
        }
    }
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}

//! Configuration types for discord-client.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Default REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Configuration for posting to a Discord channel.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Base URL of the REST API.
    pub api_base: String,
    /// Destination channel ID.
    pub channel_id: u64,
    /// Bot token.
    token: SecretString,
}

impl DiscordConfig {
    /// Create a new configuration for the given token and channel.
    pub fn new(token: impl Into<String>, channel_id: u64) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            channel_id,
            token: SecretString::from(token.into()),
        }
    }

    /// Override the API base URL (for proxies and tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.token.expose_secret())
    }

    /// Get the create-message endpoint URL for the configured channel.
    pub fn messages_url(&self) -> String {
        format!("{}/channels/{}/messages", self.api_base, self.channel_id)
    }

    /// Get the current-user endpoint URL, used as a health check.
    pub fn current_user_url(&self) -> String {
        format!("{}/users/@me", self.api_base)
    }
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("api_base", &self.api_base)
            .field("channel_id", &self.channel_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

//! Discord REST client library.
//!
//! This crate provides a small Rust client for posting notifications to a
//! single Discord channel as a bot. It supports:
//!
//! - Rich embeds with fields, color, footer and thumbnail
//! - One uploaded file per message (referenced as `attachment://<name>`)
//! - Silent delivery via the `SUPPRESS_NOTIFICATIONS` flag
//! - Token verification and connection tracking
//!
//! # Example
//!
//! ```no_run
//! use discord_client::{CreateMessage, DiscordClient, DiscordConfig, Embed};
//!
//! # async fn example() -> Result<(), discord_client::DiscordError> {
//! let config = DiscordConfig::new("bot-token", 123456789012345678);
//! let client = DiscordClient::connect(config).await?;
//!
//! let embed = Embed::new("🌍 地震情報", 0xe58a20).with_description("Hello!");
//! let sent = client.send_message(&CreateMessage::embed(embed)).await?;
//! println!("Sent message {}", sent.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::DiscordClient;
pub use config::{DiscordConfig, DEFAULT_API_BASE};
pub use error::DiscordError;
pub use types::*;

//! Integration tests for discord-client.
//!
//! Tests that talk to the real API are ignored by default and need
//! `DISCORD_TOKEN` and `CHANNEL_ID` set:
//!
//!   cargo test --test integration_tests -- --ignored

use discord_client::{CreateMessage, DiscordClient, DiscordConfig, DiscordError, Embed};
use std::env;

/// Helper to build a config from the environment.
fn env_config() -> Option<DiscordConfig> {
    let _ = dotenvy::dotenv();
    let token = env::var("DISCORD_TOKEN").ok()?;
    let channel_id = env::var("CHANNEL_ID").ok()?.parse().ok()?;
    Some(DiscordConfig::new(token, channel_id))
}

// ============================================================================
// Unit tests (no API access required)
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_config_urls() {
        let config = DiscordConfig::new("token", 42);
        assert_eq!(
            config.messages_url(),
            "https://discord.com/api/v10/channels/42/messages"
        );
        assert_eq!(config.current_user_url(), "https://discord.com/api/v10/users/@me");
    }

    #[test]
    fn test_config_custom_base() {
        let config = DiscordConfig::new("token", 7).with_api_base("http://localhost:9000/api/");
        assert_eq!(config.messages_url(), "http://localhost:9000/api/channels/7/messages");
    }

    #[test]
    fn test_authorization_header() {
        let config = DiscordConfig::new("abc", 1);
        assert_eq!(config.authorization(), "Bot abc");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DiscordConfig::new("super-secret", 1);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}

mod message_tests {
    use super::*;

    #[test]
    fn test_embed_message_serialization() {
        let embed = Embed::new("🌍 震度速報", 0xe58a20)
            .with_description("body")
            .with_field("震度情報", "A: 震度5強", false)
            .with_footer("Bot・気象庁 | Version 1.0")
            .with_attachment_thumbnail("shindo5.png");
        let msg = CreateMessage::embed(embed)
            .with_attachment("shindo5.png")
            .silent();

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["embeds"][0]["title"], "🌍 震度速報");
        assert_eq!(json["embeds"][0]["color"], 0xe58a20);
        assert_eq!(json["embeds"][0]["fields"][0]["name"], "震度情報");
        assert_eq!(json["embeds"][0]["fields"][0]["inline"], false);
        assert_eq!(
            json["embeds"][0]["thumbnail"]["url"],
            "attachment://shindo5.png"
        );
        assert_eq!(json["attachments"][0]["id"], 0);
        assert_eq!(json["attachments"][0]["filename"], "shindo5.png");
        assert_eq!(json["flags"], 4096);
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_text_message_serialization() {
        let json = serde_json::to_value(CreateMessage::text("hello")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hello" }));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiscordError::Api {
            status: 403,
            message: "Missing Access".to_string(),
        };
        assert_eq!(err.to_string(), "API error 403: Missing Access");

        let err = DiscordError::RateLimited { retry_after: 1.5 };
        assert_eq!(err.to_string(), "rate limited, retry after 1.5s");
    }
}

// ============================================================================
// Live tests (require API access)
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_live_connect_and_send() {
    let Some(config) = env_config() else {
        eprintln!("DISCORD_TOKEN / CHANNEL_ID not set, skipping");
        return;
    };
    let client = DiscordClient::connect(config).await.expect("connect");
    assert!(client.is_connected());

    let msg = CreateMessage::text("discord-client integration test").silent();
    let sent = client.send_message(&msg).await.expect("send");
    assert!(!sent.id.is_empty());
}

#[tokio::test]
async fn test_connect_with_bad_base_fails() {
    let config = DiscordConfig::new("token", 1).with_api_base("http://127.0.0.1:1");
    let result = DiscordClient::connect(config).await;
    assert!(matches!(result, Err(DiscordError::Http(_))));
}

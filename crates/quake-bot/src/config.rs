//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use discord_client::DiscordConfig;
use quake_router::EewFilter;

pub const DEFAULT_P2PQUAKE_URL: &str = "wss://api.p2pquake.net/v2/ws";
pub const DEFAULT_WOLFX_URL: &str = "wss://ws-api.wolfx.jp/jma_eew";

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Outbound channel credentials. `None` only in dry-run mode.
    pub discord: Option<DiscordConfig>,
    pub eew_filter: EewFilter,
    /// Include the accuracy triple in early warnings.
    pub show_accuracy: bool,
    pub p2pquake_url: String,
    pub wolfx_url: String,
    pub reconnect_delay: Duration,
    /// How long an alert title stays in the presence display.
    pub presence_reset: Duration,
    pub status_interval: Duration,
    /// Status server bind address.
    pub status_addr: SocketAddr,
    /// Directory holding intensity images.
    pub image_dir: PathBuf,
    /// Canned records for replay.
    pub replay_data: PathBuf,
    pub bot_name: String,
    /// Log notifications instead of sending them.
    pub dry_run: bool,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DISCORD_TOKEN` / `TOKEN` | Bot token | (required unless dry run) |
    /// | `CHANNEL_ID` / `ChannelID` | Destination channel | (required unless dry run) |
    /// | `EEW_FILTER` | `None`, `Warning` or `Forecast` | all |
    /// | `EEW_SHOW_ACCURACY` | Show accuracy fields | `false` |
    /// | `P2PQUAKE_WS_URL` | P2PQuake feed | `wss://api.p2pquake.net/v2/ws` |
    /// | `WOLFX_WS_URL` | Wolfx feed | `wss://ws-api.wolfx.jp/jma_eew` |
    /// | `RECONNECT_DELAY_SECS` | Reconnect delay | `5` |
    /// | `PRESENCE_RESET_SECS` | Alert presence duration | `20` |
    /// | `STATUS_INTERVAL_SECS` | Status sampler period | `60` |
    /// | `STATUS_ADDR` | Status server address | `127.0.0.1:8790` |
    /// | `IMAGE_DIR` | Intensity images | `images` |
    /// | `REPLAY_DATA` | Replay records | `testdata.json` |
    /// | `BOT_NAME` | Footer name | `QuakeBot` |
    /// | `DRY_RUN` | Log instead of send | `false` |
    ///
    /// `force_dry_run` turns dry-run mode on regardless of `DRY_RUN`.
    pub fn from_env(force_dry_run: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), force_dry_run)
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, force_dry_run: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dry_run = force_dry_run || parse_bool("DRY_RUN", var("DRY_RUN"))?;

        let token = var("DISCORD_TOKEN").or_else(|| var("TOKEN"));
        let channel_id = match var("CHANNEL_ID").or_else(|| var("ChannelID")) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidChannelId(raw.clone()))?,
            ),
            None => None,
        };

        let discord = match (token, channel_id) {
            (Some(token), Some(channel_id)) => Some(DiscordConfig::new(token, channel_id)),
            _ if dry_run => None,
            (None, _) => return Err(ConfigError::MissingToken),
            (Some(_), None) => return Err(ConfigError::MissingChannelId),
        };

        let eew_filter = EewFilter::from_setting(var("EEW_FILTER").as_deref())
            .map_err(|e| ConfigError::InvalidFilter(e.to_string()))?;

        let status_addr = var("STATUS_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8790".to_string());
        let status_addr = status_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(status_addr.clone()))?;

        Ok(Self {
            discord,
            eew_filter,
            show_accuracy: parse_bool("EEW_SHOW_ACCURACY", var("EEW_SHOW_ACCURACY"))?,
            p2pquake_url: var("P2PQUAKE_WS_URL").unwrap_or_else(|| DEFAULT_P2PQUAKE_URL.to_string()),
            wolfx_url: var("WOLFX_WS_URL").unwrap_or_else(|| DEFAULT_WOLFX_URL.to_string()),
            reconnect_delay: parse_secs("RECONNECT_DELAY_SECS", var("RECONNECT_DELAY_SECS"), 5)?,
            presence_reset: parse_secs("PRESENCE_RESET_SECS", var("PRESENCE_RESET_SECS"), 20)?,
            status_interval: parse_secs("STATUS_INTERVAL_SECS", var("STATUS_INTERVAL_SECS"), 60)?,
            status_addr,
            image_dir: var("IMAGE_DIR").map_or_else(|| PathBuf::from("images"), PathBuf::from),
            replay_data: var("REPLAY_DATA")
                .map_or_else(|| PathBuf::from("testdata.json"), PathBuf::from),
            bot_name: var("BOT_NAME").unwrap_or_else(|| "QuakeBot".to_string()),
            dry_run,
        })
    }
}

fn parse_bool(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

fn parse_secs(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(value) => value
            .trim()
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN environment variable is required")]
    MissingToken,

    #[error("CHANNEL_ID environment variable is required")]
    MissingChannelId,

    #[error("Invalid CHANNEL_ID: {0}")]
    InvalidChannelId(String),

    #[error("Invalid EEW_FILTER: {0}")]
    InvalidFilter(String),

    #[error("Invalid STATUS_ADDR: {0}")]
    InvalidAddr(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)], force_dry_run: bool) -> Result<BotConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| map.get(key).cloned(), force_dry_run)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DISCORD_TOKEN", "t"), ("CHANNEL_ID", "42")], false).unwrap();
        assert_eq!(config.discord.unwrap().channel_id, 42);
        assert_eq!(config.eew_filter, EewFilter::All);
        assert!(!config.show_accuracy);
        assert_eq!(config.p2pquake_url, DEFAULT_P2PQUAKE_URL);
        assert_eq!(config.wolfx_url, DEFAULT_WOLFX_URL);
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.presence_reset, Duration::from_secs(20));
        assert_eq!(config.status_interval, Duration::from_secs(60));
        assert_eq!(config.status_addr.port(), 8790);
        assert_eq!(config.bot_name, "QuakeBot");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_legacy_names() {
        let config = load(&[("TOKEN", "t"), ("ChannelID", "7")], false).unwrap();
        assert_eq!(config.discord.unwrap().channel_id, 7);
    }

    #[test]
    fn test_required_credentials() {
        assert!(matches!(
            load(&[("CHANNEL_ID", "1")], false),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            load(&[("DISCORD_TOKEN", "t")], false),
            Err(ConfigError::MissingChannelId)
        ));
        assert!(matches!(
            load(&[("DISCORD_TOKEN", "t"), ("CHANNEL_ID", "abc")], false),
            Err(ConfigError::InvalidChannelId(_))
        ));
    }

    #[test]
    fn test_dry_run_without_credentials() {
        let config = load(&[("DRY_RUN", "true")], false).unwrap();
        assert!(config.dry_run);
        assert!(config.discord.is_none());

        let config = load(&[], true).unwrap();
        assert!(config.dry_run);
    }

    #[test]
    fn test_filter_and_accuracy() {
        let config = load(
            &[
                ("DRY_RUN", "1"),
                ("EEW_FILTER", "Warning"),
                ("EEW_SHOW_ACCURACY", "true"),
            ],
            false,
        )
        .unwrap();
        assert_eq!(config.eew_filter, EewFilter::WarningOnly);
        assert!(config.show_accuracy);

        assert!(matches!(
            load(&[("DRY_RUN", "1"), ("EEW_FILTER", "Loud")], false),
            Err(ConfigError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            load(&[("DRY_RUN", "1"), ("RECONNECT_DELAY_SECS", "soon")], false),
            Err(ConfigError::InvalidValue { name: "RECONNECT_DELAY_SECS", .. })
        ));
        assert!(matches!(
            load(&[("DRY_RUN", "maybe")], false),
            Err(ConfigError::InvalidValue { name: "DRY_RUN", .. })
        ));
        assert!(matches!(
            load(&[("DRY_RUN", "1"), ("STATUS_ADDR", "nowhere")], false),
            Err(ConfigError::InvalidAddr(_))
        ));
    }
}

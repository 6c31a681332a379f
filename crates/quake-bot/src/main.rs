//! Earthquake and tsunami alert relay bot.
//!
//! Listens to the P2PQuake and Wolfx feeds and posts alerts to a Discord
//! channel.

use std::future::IntoFuture;
use std::sync::Arc;

use broadcaster::Broadcaster;
use clap::Parser;
use feed_listener::{FeedConnection, ReconnectConfig, WsConnector};
use mock_sink::LoggingSink;
use quake_core::{FormatOptions, Formatter, NotificationSink};
use quake_router::{P2pQuakeRouter, WolfxEewRouter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quake_bot::config::{BotConfig, ConfigError};
use quake_bot::presence::{Presence, PresenceSink};
use quake_bot::replay::{load_records, ReplayDriver};
use quake_bot::sampler::run_sampler;
use quake_bot::state::{AppState, FeedStatus};
use quake_bot::supervise::watch;

#[derive(Debug, Parser)]
#[command(name = "quake-bot")]
#[command(about = "Relay earthquake and tsunami alerts to a Discord channel")]
struct Args {
    /// Replay the canned test records once and exit
    #[arg(long)]
    replay: bool,

    /// Log notifications instead of sending them
    #[arg(long)]
    dry_run: bool,
}

async fn build_sink(config: &BotConfig) -> Result<Arc<dyn NotificationSink>, Box<dyn std::error::Error>> {
    if config.dry_run {
        info!("Dry run: notifications will be logged only");
        return Ok(Arc::new(LoggingSink));
    }
    let discord = config.discord.clone().ok_or(ConfigError::MissingToken)?;
    let broadcaster = Broadcaster::connect(discord, &config.image_dir).await?;
    Ok(Arc::new(broadcaster))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = BotConfig::from_env(args.dry_run)?;
    info!(version = quake_bot::version(), "Starting {}", config.bot_name);

    let options = FormatOptions::new(&config.bot_name, quake_bot::version())
        .with_accuracy(config.show_accuracy);
    let presence = Presence::new(quake_bot::version(), config.presence_reset);
    let sink: Arc<dyn NotificationSink> =
        Arc::new(PresenceSink::new(build_sink(&config).await?, presence.clone()));

    let replay = match load_records(&config.replay_data) {
        Ok(records) => {
            info!(records = records.len(), "Loaded replay data from {:?}", config.replay_data);
            Some(Arc::new(ReplayDriver::new(records, Arc::clone(&sink), &options)))
        }
        Err(e) => {
            warn!(error = %e, "Replay data unavailable");
            None
        }
    };

    if args.replay {
        let driver = replay.ok_or("replay data is not available")?;
        let summary = driver.run().await?;
        info!(?summary, "Replay complete");
        return Ok(());
    }

    let reconnect = ReconnectConfig::new(config.reconnect_delay);
    let p2pquake = Arc::new(
        FeedConnection::new("p2pquake", &config.p2pquake_url, WsConnector).with_reconnect(reconnect),
    );
    let wolfx = Arc::new(
        FeedConnection::new("wolfx", &config.wolfx_url, WsConnector).with_reconnect(reconnect),
    );

    let p2pquake_router = Arc::new(P2pQuakeRouter::new(
        Arc::clone(&sink),
        Formatter::new(options.clone()),
        config.eew_filter,
    ));
    let wolfx_router = Arc::new(WolfxEewRouter::new(
        Arc::clone(&sink),
        Formatter::new(options.clone()),
        config.eew_filter,
    ));

    let state = AppState::new(
        vec![
            FeedStatus {
                name: p2pquake.name().to_string(),
                url: p2pquake.url().to_string(),
                handle: p2pquake.status(),
            },
            FeedStatus {
                name: wolfx.name().to_string(),
                url: wolfx.url().to_string(),
                handle: wolfx.status(),
            },
        ],
        presence,
        replay,
    );

    let p2pquake_task = tokio::spawn(async move { p2pquake.run(p2pquake_router.as_ref()).await });
    let wolfx_task = tokio::spawn(async move { wolfx.run(wolfx_router.as_ref()).await });
    let sampler_task = tokio::spawn(run_sampler(state.clone(), config.status_interval));

    info!(addr = %config.status_addr, "Status server listening");
    let listener = tokio::net::TcpListener::bind(config.status_addr).await?;
    let server = axum::serve(listener, quake_bot::app(state)).into_future();

    // None of these should finish; exit so the service manager restarts us
    tokio::select! {
        result = server => result?,
        exit = watch("p2pquake", p2pquake_task) => return Err(format!("p2pquake feed {}", exit).into()),
        exit = watch("wolfx", wolfx_task) => return Err(format!("wolfx feed {}", exit).into()),
        exit = watch("sampler", sampler_task) => return Err(format!("status sampler {}", exit).into()),
    }

    Ok(())
}

//! Periodic status sampler.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::state::AppState;

/// Idle presence text: version plus one status per feed.
pub fn idle_text(state: &AppState) -> String {
    let feeds: Vec<String> = state
        .snapshots()
        .iter()
        .map(|s| format!("{}: {}", s.name, s.status))
        .collect();
    format!("{} | {}", state.version, feeds.join(" / "))
}

/// Log feed statuses and refresh the idle presence every `period`. Never returns.
pub async fn run_sampler(state: AppState, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        for snapshot in state.snapshots() {
            info!(
                source = %snapshot.name,
                status = %snapshot.status,
                "Feed status"
            );
        }
        info!(uptime_secs = state.uptime().as_secs(), "Status sample");
        state.presence.set_idle(idle_text(&state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::Presence;
    use crate::state::FeedStatus;
    use feed_listener::{ConnectionStatus, StatusCell};

    #[tokio::test(start_paused = true)]
    async fn test_sampler_refreshes_idle_text() {
        let p2p = StatusCell::new();
        let wolfx = StatusCell::new();
        let feeds = vec![
            FeedStatus {
                name: "p2pquake".to_string(),
                url: "wss://p2p.invalid".to_string(),
                handle: p2p.handle(),
            },
            FeedStatus {
                name: "wolfx".to_string(),
                url: "wss://wolfx.invalid".to_string(),
                handle: wolfx.handle(),
            },
        ];
        let presence = Presence::new("starting", Duration::from_secs(20));
        let state = AppState::new(feeds, presence.clone(), None);

        p2p.set(ConnectionStatus::Connected);
        wolfx.set(ConnectionStatus::Reconnecting);

        let task = tokio::spawn(run_sampler(state.clone(), Duration::from_secs(60)));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            presence.current(),
            format!("{} | p2pquake: connected / wolfx: reconnecting", state.version)
        );

        wolfx.set(ConnectionStatus::Connected);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(presence.current().ends_with("wolfx: connected"));

        task.abort();
    }
}

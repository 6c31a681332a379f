//! Presence display.
//!
//! The presence line normally shows an idle summary. After each published
//! notification it shows the alert title, then falls back to the idle text
//! once the reset delay passes, unless a newer alert replaced it first.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use quake_core::{async_trait, NotificationSink, RenderedNotification, SinkError};
use tracing::info;

#[derive(Debug)]
struct Display {
    idle: String,
    alert: Option<String>,
    /// Bumped by every alert; a reset only applies to the alert that scheduled it.
    generation: u64,
}

#[derive(Debug)]
struct Inner {
    display: RwLock<Display>,
    reset_after: Duration,
}

/// Shared presence state.
#[derive(Debug, Clone)]
pub struct Presence {
    inner: Arc<Inner>,
}

impl Presence {
    pub fn new(idle: impl Into<String>, reset_after: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                display: RwLock::new(Display {
                    idle: idle.into(),
                    alert: None,
                    generation: 0,
                }),
                reset_after,
            }),
        }
    }

    /// Text currently shown.
    pub fn current(&self) -> String {
        let display = self.read();
        display.alert.clone().unwrap_or_else(|| display.idle.clone())
    }

    pub fn is_showing_alert(&self) -> bool {
        self.read().alert.is_some()
    }

    /// Replace the idle text. An active alert stays on screen.
    pub fn set_idle(&self, idle: impl Into<String>) {
        self.write().idle = idle.into();
    }

    /// Show an alert title and schedule the reset.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_alert(&self, title: &str) {
        let generation = self.show(title);
        info!(presence = %title, "Presence updated");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.reset_after).await;
            let mut shown = inner
                .display
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // A newer alert owns the display now
            if shown.generation != generation {
                return;
            }
            shown.alert = None;
            info!(presence = %shown.idle, "Presence reset");
        });
    }

    /// Put the title on display and return the generation that owns it.
    fn show(&self, title: &str) -> u64 {
        let mut shown = self.write();
        shown.generation += 1;
        shown.alert = Some(title.to_string());
        shown.generation
    }

    fn read(&self) -> RwLockReadGuard<'_, Display> {
        self.inner
            .display
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Display> {
        self.inner
            .display
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Sink decorator that mirrors each delivered notification into the presence.
pub struct PresenceSink<S: NotificationSink> {
    inner: S,
    presence: Presence,
}

impl<S: NotificationSink> PresenceSink<S> {
    pub fn new(inner: S, presence: Presence) -> Self {
        Self { inner, presence }
    }
}

#[async_trait]
impl<S: NotificationSink> NotificationSink for PresenceSink<S> {
    async fn publish(&self, notification: &RenderedNotification) -> Result<(), SinkError> {
        self.inner.publish(notification).await?;
        self.presence.show_alert(&notification.title);
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_sink::{FailingSink, RecordingSink};

    fn notification(title: &str) -> RenderedNotification {
        RenderedNotification {
            title: title.to_string(),
            body: String::new(),
            fields: Vec::new(),
            color: 0,
            image: None,
            footer: String::new(),
            silent: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_resets_after_delay() {
        let presence = Presence::new("v1.0.0", Duration::from_secs(20));
        presence.show_alert("緊急地震速報");
        assert_eq!(presence.current(), "緊急地震速報");

        tokio::time::sleep(Duration::from_secs(19)).await;
        assert_eq!(presence.current(), "緊急地震速報");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(presence.current(), "v1.0.0");
        assert!(!presence.is_showing_alert());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_alert_is_not_cleared_early() {
        let presence = Presence::new("idle", Duration::from_secs(20));
        presence.show_alert("first");
        tokio::time::sleep(Duration::from_secs(15)).await;
        presence.show_alert("second");

        // The first alert's reset fires here and must be ignored
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(presence.current(), "second");

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(presence.current(), "idle");
    }

    #[test]
    fn test_concurrent_alerts_keep_latest_title() {
        let presence = Presence::new("idle", Duration::from_secs(20));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let presence = presence.clone();
                std::thread::spawn(move || {
                    let title = format!("alert-{}", i);
                    let generation = presence.show(&title);
                    (generation, title)
                })
            })
            .collect();
        let mut shown: Vec<(u64, String)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        shown.sort();

        let generations: Vec<u64> = shown.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, (1..=8).collect::<Vec<u64>>());
        let (_, latest) = shown.last().unwrap();
        assert_eq!(&presence.current(), latest);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_idle_keeps_alert() {
        let presence = Presence::new("idle", Duration::from_secs(20));
        presence.show_alert("alert");
        presence.set_idle("idle 2");
        assert_eq!(presence.current(), "alert");

        tokio::time::sleep(Duration::from_secs(21)).await;
        assert_eq!(presence.current(), "idle 2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_presence_sink() {
        let presence = Presence::new("idle", Duration::from_secs(20));
        let recorder = RecordingSink::new();
        let sink = PresenceSink::new(recorder.clone(), presence.clone());

        sink.publish(&notification("🌍 震度速報")).await.unwrap();
        assert_eq!(recorder.len(), 1);
        assert_eq!(presence.current(), "🌍 震度速報");

        let failing = PresenceSink::new(FailingSink::always(), presence.clone());
        assert!(failing.publish(&notification("lost")).await.is_err());
        assert_eq!(presence.current(), "🌍 震度速報");
    }
}

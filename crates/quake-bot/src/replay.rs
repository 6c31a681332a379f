//! Replay of canned early-warning records.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use quake_core::{FormatOptions, Formatter, NotificationSink, SinkError};
use quake_router::{EewFilter, WolfxEewRouter};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Shortest pause between replayed records, in milliseconds.
const MIN_GAP_MS: u64 = 500;
/// Longest pause between replayed records, in milliseconds.
const MAX_GAP_MS: u64 = 1000;

/// Errors from loading or running a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid replay data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("replay data must be a JSON array of records")]
    NotAnArray,

    #[error("a replay is already running")]
    AlreadyRunning,

    #[error("failed to publish replay banner: {0}")]
    Banner(#[from] SinkError),
}

/// Outcome of one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub published: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Load canned records from a JSON array file.
pub fn load_records(path: &Path) -> Result<Vec<Value>, ReplayError> {
    let text = std::fs::read_to_string(path)?;
    parse_records(&text)
}

pub fn parse_records(text: &str) -> Result<Vec<Value>, ReplayError> {
    match serde_json::from_str(text)? {
        Value::Array(records) => Ok(records),
        _ => Err(ReplayError::NotAnArray),
    }
}

/// Clears the running flag when a run ends, however it ends.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Feeds canned records through the early-warning routing path.
///
/// Notifications are marked as test data. The early-warning filter is not
/// applied so a replay always shows every record.
pub struct ReplayDriver {
    records: Vec<Value>,
    sink: Arc<dyn NotificationSink>,
    formatter: Formatter,
    router: WolfxEewRouter<Arc<dyn NotificationSink>>,
    running: Arc<AtomicBool>,
}

impl ReplayDriver {
    pub fn new(records: Vec<Value>, sink: Arc<dyn NotificationSink>, options: &FormatOptions) -> Self {
        let formatter = Formatter::new(options.for_test_data());
        let router = WolfxEewRouter::new(Arc::clone(&sink), formatter.clone(), EewFilter::All);
        Self {
            records,
            sink,
            formatter,
            router,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a replay in the background.
    pub fn start(
        self: &Arc<Self>,
    ) -> Result<JoinHandle<Result<ReplaySummary, ReplayError>>, ReplayError> {
        let guard = self.acquire()?;
        let driver = Arc::clone(self);
        Ok(tokio::spawn(async move { driver.play(guard).await }))
    }

    /// Run a replay to completion.
    pub async fn run(&self) -> Result<ReplaySummary, ReplayError> {
        let guard = self.acquire()?;
        self.play(guard).await
    }

    fn acquire(&self) -> Result<RunGuard, ReplayError> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ReplayError::AlreadyRunning)?;
        Ok(RunGuard(Arc::clone(&self.running)))
    }

    async fn play(&self, _guard: RunGuard) -> Result<ReplaySummary, ReplayError> {
        info!(records = self.records.len(), "Starting replay");
        self.sink.publish(&self.formatter.test_banner()).await?;

        let mut summary = ReplaySummary::default();
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(jitter()).await;
            }
            match self.router.route(record).await {
                Ok(Some(_)) => summary.published += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    warn!(record = i, error = %e, "Replay record failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            published = summary.published,
            skipped = summary.skipped,
            failed = summary.failed,
            "Replay finished"
        );
        Ok(summary)
    }
}

fn jitter() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(MIN_GAP_MS..=MAX_GAP_MS))
}

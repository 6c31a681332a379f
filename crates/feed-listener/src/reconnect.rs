//! Reconnection policy.

use std::time::Duration;

/// Default wait between a failure and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Flat-delay reconnection with unbounded retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectConfig {
    pub delay: Duration,
}

impl ReconnectConfig {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay() {
        assert_eq!(ReconnectConfig::default().delay, Duration::from_secs(5));
        assert_eq!(ReconnectConfig::from_secs(2).delay, Duration::from_secs(2));
    }
}

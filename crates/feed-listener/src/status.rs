//! Connection status tracking.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the transition channel. Slow subscribers lag rather than block.
const TRANSITION_CAPACITY: usize = 32;

/// Lifecycle state of one feed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ConnectionStatus {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    Reconnecting = 3,
    Error = 4,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Reconnecting => "reconnecting",
            ConnectionStatus::Error => "error",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionStatus::Connecting,
            2 => ConnectionStatus::Connected,
            3 => ConnectionStatus::Reconnecting,
            4 => ConnectionStatus::Error,
            _ => ConnectionStatus::Disconnected,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writable status owned by a single connection loop.
///
/// Every transition is stored and broadcast, so subscribers observe each
/// step even when several happen back to back.
#[derive(Debug)]
pub struct StatusCell {
    current: Arc<AtomicU8>,
    transitions: broadcast::Sender<ConnectionStatus>,
}

impl StatusCell {
    pub fn new() -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            current: Arc::new(AtomicU8::new(ConnectionStatus::Disconnected as u8)),
            transitions,
        }
    }

    pub fn set(&self, status: ConnectionStatus) {
        self.current.store(status as u8, Ordering::SeqCst);
        // No subscribers is fine
        let _ = self.transitions.send(status);
    }

    pub fn current(&self) -> ConnectionStatus {
        ConnectionStatus::from_u8(self.current.load(Ordering::SeqCst))
    }

    /// Read-only view for other tasks.
    pub fn handle(&self) -> StatusHandle {
        StatusHandle {
            current: Arc::clone(&self.current),
            transitions: self.transitions.clone(),
        }
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a [`StatusCell`].
#[derive(Debug, Clone)]
pub struct StatusHandle {
    current: Arc<AtomicU8>,
    transitions: broadcast::Sender<ConnectionStatus>,
}

impl StatusHandle {
    pub fn current(&self) -> ConnectionStatus {
        ConnectionStatus::from_u8(self.current.load(Ordering::SeqCst))
    }

    /// Receive every transition made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionStatus> {
        self.transitions.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status() {
        let cell = StatusCell::new();
        assert_eq!(cell.current(), ConnectionStatus::Disconnected);
        assert_eq!(cell.handle().current(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_handle_sees_updates() {
        let cell = StatusCell::new();
        let handle = cell.handle();
        cell.set(ConnectionStatus::Reconnecting);
        assert_eq!(handle.current(), ConnectionStatus::Reconnecting);
    }

    #[tokio::test]
    async fn test_transitions_are_not_coalesced() {
        let cell = StatusCell::new();
        let mut rx = cell.handle().subscribe();
        cell.set(ConnectionStatus::Connecting);
        cell.set(ConnectionStatus::Connected);
        cell.set(ConnectionStatus::Error);
        assert_eq!(rx.recv().await.unwrap(), ConnectionStatus::Connecting);
        assert_eq!(rx.recv().await.unwrap(), ConnectionStatus::Connected);
        assert_eq!(rx.recv().await.unwrap(), ConnectionStatus::Error);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ConnectionStatus::Reconnecting).unwrap();
        assert_eq!(json, "\"reconnecting\"");
        assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
    }
}

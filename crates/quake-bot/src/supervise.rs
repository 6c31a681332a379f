//! Watching background tasks that are expected to run forever.

use std::any::Any;
use std::fmt;

use tokio::task::JoinHandle;
use tracing::error;

/// How a background task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskExit {
    Returned,
    Panicked(String),
    Cancelled,
}

impl fmt::Display for TaskExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskExit::Returned => f.write_str("returned"),
            TaskExit::Panicked(message) => write!(f, "panicked: {}", message),
            TaskExit::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Wait for a background task and log how it ended.
///
/// Any exit is unexpected for the tasks this is used with.
pub async fn watch(name: &str, handle: JoinHandle<()>) -> TaskExit {
    let exit = match handle.await {
        Ok(()) => TaskExit::Returned,
        Err(e) if e.is_panic() => TaskExit::Panicked(panic_message(e.into_panic())),
        Err(_) => TaskExit::Cancelled,
    };
    error!(task = name, exit = %exit, "Background task stopped");
    exit
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returned_task() {
        let handle = tokio::spawn(async {});
        assert_eq!(watch("feed", handle).await, TaskExit::Returned);
    }

    #[tokio::test]
    async fn test_panicked_task_keeps_message() {
        let handle = tokio::spawn(async { panic!("connector blew up") });
        assert_eq!(
            watch("feed", handle).await,
            TaskExit::Panicked("connector blew up".to_string())
        );

        let code = 7;
        let handle = tokio::spawn(async move { panic!("code {}", code) });
        assert_eq!(
            watch("feed", handle).await.to_string(),
            "panicked: code 7"
        );
    }

    #[tokio::test]
    async fn test_aborted_task() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        assert_eq!(watch("sampler", handle).await, TaskExit::Cancelled);
    }
}

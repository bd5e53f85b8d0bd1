//! Shutdown coordination
//!
//! A process-termination signal and a successful rebuild both end the
//! process the same way: the first requested reason is recorded, the
//! dispatcher is stopped, and state is flushed before `main` returns.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Why the bot is stopping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Operating system signal, by name
    Signal(String),
    /// A rebuild finished and the new binary should be started
    Rebuild { branch: String },
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Signal(name) => write!(f, "{}", name),
            ShutdownReason::Rebuild { branch } => write!(f, "Rebuild ({})", branch),
        }
    }
}

/// Cloneable handle for requesting and awaiting shutdown
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<Option<ShutdownReason>>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Only the first reason is kept.
    pub fn request(&self, reason: ShutdownReason) -> bool {
        let accepted = self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason.clone());
            true
        });

        if accepted {
            info!(reason = %reason, "Shutdown requested");
        } else {
            debug!(reason = %reason, "Shutdown already requested");
        }
        accepted
    }

    /// The recorded reason, if shutdown was requested
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.tx.borrow().clone()
    }

    pub fn is_requested(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) -> ShutdownReason {
        let mut rx = self.tx.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(reason) = current {
                return reason;
            }
            // The sender lives in `self`, so the channel cannot close while we wait.
            if rx.changed().await.is_err() {
                return ShutdownReason::Signal("channel closed".to_string());
            }
        }
    }
}

/// Resolve when the process is asked to terminate, naming the signal
pub async fn termination_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                Ok("interrupt")
            }
            _ = terminate.recv() => Ok("terminated"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("interrupt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_first_reason_wins() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_requested());

        assert!(signal.request(ShutdownReason::Rebuild { branch: "master".to_string() }));
        assert!(!signal.request(ShutdownReason::Signal("interrupt".to_string())));

        assert_eq!(signal.reason(), Some(ShutdownReason::Rebuild { branch: "master".to_string() }));
        assert_eq!(signal.wait().await, ShutdownReason::Rebuild { branch: "master".to_string() });
    }

    #[tokio::test]
    async fn test_wait_wakes_on_request() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        signal.request(ShutdownReason::Signal("terminated".to_string()));

        let reason = tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
        assert_eq!(reason.to_string(), "terminated");
    }
}

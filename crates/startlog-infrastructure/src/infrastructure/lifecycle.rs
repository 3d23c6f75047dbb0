//! Host Lifecycle
//!
//! Host state tracking and the default shutdown coordinator.

use serde::{Deserialize, Serialize};
use startlog_domain::ports::ShutdownCoordinator;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tracing::info;

/// Host state
///
/// `Created -> Starting -> Running`, or `Starting -> Failed` when a startup
/// hook returns an error. Neither `Running` nor `Failed` starts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum HostState {
    #[default]
    Created = 0,
    Starting = 1,
    Running = 2,
    Failed = 3,
}

impl HostState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Starting,
            2 => Self::Running,
            _ => Self::Failed,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Default implementation of ShutdownCoordinator using atomics and Notify
///
/// Tokio's Notify provides async waiting; an AtomicBool provides fast
/// shutdown status checks.
pub struct DefaultShutdownCoordinator {
    /// Shutdown signal flag
    shutdown_signal: AtomicBool,
    /// Notification channel for async waiting
    notify: Notify,
}

impl DefaultShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            shutdown_signal: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    /// Wait asynchronously for the shutdown signal
    pub async fn wait_for_shutdown(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register interest before checking the flag so a signal sent in
        // between is not lost.
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}

impl Default for DefaultShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultShutdownCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultShutdownCoordinator")
            .field("is_shutting_down", &self.is_shutting_down())
            .finish()
    }
}

impl ShutdownCoordinator for DefaultShutdownCoordinator {
    fn signal_shutdown(&self) {
        info!("Shutdown signal received");
        self.shutdown_signal.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }
}

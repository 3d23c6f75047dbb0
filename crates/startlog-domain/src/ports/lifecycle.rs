//! Lifecycle Ports
//!
//! Shutdown signalling shared by the host and anything that waits on it.

/// Shutdown signalling
pub trait ShutdownCoordinator: Send + Sync {
    /// Signal all waiters that shutdown has begun
    fn signal_shutdown(&self);

    /// Whether shutdown has been signalled
    fn is_shutting_down(&self) -> bool;
}

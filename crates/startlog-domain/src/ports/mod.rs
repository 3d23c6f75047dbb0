//! Domain Port Interfaces
//!
//! Boundary contracts between the deferred registry and the collaborators it
//! consumes but does not own.
//!
//! - **logging** - logger factory and logger instances
//! - **lifecycle** - shutdown coordination

/// Logger construction and log emission
pub mod logging;
/// Shutdown coordination
pub mod lifecycle;

pub use lifecycle::ShutdownCoordinator;
pub use logging::{LogLevel, Logger, LoggerFactory};

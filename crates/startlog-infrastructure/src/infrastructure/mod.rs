//! Host Integration
//!
//! The host owns composition (service catalog, startup hooks, the lazily
//! created deferred log registry) and runs every startup hook exactly once
//! when it starts.

pub mod hooks;
pub mod host;
pub mod lifecycle;

pub use hooks::{StartupHook, StartupHooks};
pub use host::{Host, HostBuilder};
pub use lifecycle::{DefaultShutdownCoordinator, HostState};

//! Configuration
//!
//! Figment-layered configuration: defaults, then a TOML file, then
//! `STARTLOG__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, ConfigSource};
pub use types::{AppConfig, LoggingConfig, StartupConfig};

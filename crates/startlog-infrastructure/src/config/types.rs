//! Configuration types

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use startlog_domain::constants::DEFAULT_STARTUP_CATEGORY;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Subscriber configuration
    pub logging: LoggingConfig,

    /// Deferred startup log configuration
    pub startup: StartupConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Deferred startup log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Category used by steps that do not name one
    pub default_category: String,

    /// Replay registered steps when the host starts
    pub enabled: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_STARTUP_CATEGORY.to_string(),
            enabled: true,
        }
    }
}

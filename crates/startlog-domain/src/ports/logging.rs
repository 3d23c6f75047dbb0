//! Logger Ports
//!
//! Defines the contract for logger construction. The registry never decides
//! how records are rendered or shipped; it only asks a factory for a logger
//! per category and hands that logger to each step.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    /// Lowercase name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" | "information" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            other => Err(Error::invalid_argument(format!(
                "Invalid log level: {other}. Use trace, debug, info, warn, error or critical"
            ))),
        }
    }
}

/// A logger bound to one category
///
/// Implementations must be cheap to share; the registry hands the same
/// `Arc<dyn Logger>` to every step that targets the same category.
pub trait Logger: Send + Sync {
    /// Category this logger was created for
    fn category(&self) -> &str;

    /// Emit a record at the given level
    fn log(&self, level: LogLevel, message: &str);

    /// Whether records at `level` would be emitted
    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }

    /// Emit a trace record
    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Emit a debug record
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Emit an info record
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Emit a warning record
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Emit an error record
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Emit a critical record
    fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

/// Creates loggers by category name
///
/// The factory must not call back into the logger cache that owns it;
/// construction happens while the cache entry for `category` is locked.
pub trait LoggerFactory: Send + Sync {
    /// Create a logger for `category`
    fn create_logger(&self, category: &str) -> Arc<dyn Logger>;
}

impl fmt::Debug for dyn Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category())
            .finish()
    }
}

//! `tracing`-backed loggers
//!
//! Records are emitted as `tracing` events under the `startlog` target, with
//! the logger category attached as a structured `category` field. Rendering
//! and shipping are left to whatever subscriber is installed.

use startlog_domain::ports::{LogLevel, Logger, LoggerFactory};
use std::sync::Arc;
use tracing::Level;

/// Maps a domain level to the closest `tracing` level
pub fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error | LogLevel::Critical => Level::ERROR,
    }
}

#[derive(Debug, Clone)]
pub struct TracingLogger {
    category: String,
}

impl TracingLogger {
    pub fn new<S: Into<String>>(category: S) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn category(&self) -> &str {
        &self.category
    }

    fn log(&self, level: LogLevel, message: &str) {
        let category = self.category.as_str();
        match level {
            LogLevel::Trace => tracing::trace!(target: "startlog", category, "{message}"),
            LogLevel::Debug => tracing::debug!(target: "startlog", category, "{message}"),
            LogLevel::Info => tracing::info!(target: "startlog", category, "{message}"),
            LogLevel::Warn => tracing::warn!(target: "startlog", category, "{message}"),
            LogLevel::Error => tracing::error!(target: "startlog", category, "{message}"),
            LogLevel::Critical => {
                tracing::error!(target: "startlog", category, critical = true, "{message}");
            }
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: "startlog", Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: "startlog", Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: "startlog", Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: "startlog", Level::WARN),
            LogLevel::Error | LogLevel::Critical => {
                tracing::enabled!(target: "startlog", Level::ERROR)
            }
        }
    }
}

/// Creates a [`TracingLogger`] per category
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoggerFactory;

impl TracingLoggerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, category: &str) -> Arc<dyn Logger> {
        Arc::new(TracingLogger::new(category))
    }
}

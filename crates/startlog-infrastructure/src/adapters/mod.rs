//! Adapters from domain ports to the tracing ecosystem

pub mod tracing_logger;

pub use tracing_logger::{TracingLogger, TracingLoggerFactory};

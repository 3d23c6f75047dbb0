//! tracing-backed logger adapter

use startlog_domain::ports::{LogLevel, Logger, LoggerFactory};
use startlog_infrastructure::adapters::tracing_logger::to_tracing_level;
use startlog_infrastructure::{TracingLogger, TracingLoggerFactory};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(max_level: Level, f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(max_level)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn test_level_mapping() {
    assert_eq!(to_tracing_level(LogLevel::Trace), Level::TRACE);
    assert_eq!(to_tracing_level(LogLevel::Debug), Level::DEBUG);
    assert_eq!(to_tracing_level(LogLevel::Info), Level::INFO);
    assert_eq!(to_tracing_level(LogLevel::Warn), Level::WARN);
    assert_eq!(to_tracing_level(LogLevel::Error), Level::ERROR);
    assert_eq!(to_tracing_level(LogLevel::Critical), Level::ERROR);
}

#[test]
fn test_factory_creates_logger_for_category() {
    let factory = TracingLoggerFactory::new();
    let logger = factory.create_logger("App.Startup");
    assert_eq!(logger.category(), "App.Startup");
}

#[test]
fn test_records_carry_category_and_message() {
    let output = capture(Level::TRACE, || {
        TracingLogger::new("App.Startup").info("listening on 8080");
    });

    assert!(output.contains("INFO"));
    assert!(output.contains("startlog"));
    assert!(output.contains("category=\"App.Startup\""));
    assert!(output.contains("listening on 8080"));
}

#[test]
fn test_critical_is_flagged() {
    let output = capture(Level::TRACE, || {
        TracingLogger::new("App").critical("disk full");
    });

    assert!(output.contains("ERROR"));
    assert!(output.contains("critical=true"));
    assert!(output.contains("disk full"));
}

#[test]
fn test_records_below_max_level_are_dropped() {
    let output = capture(Level::WARN, || {
        let logger = TracingLogger::new("App");
        assert!(!logger.is_enabled(LogLevel::Info));
        assert!(logger.is_enabled(LogLevel::Warn));
        assert!(logger.is_enabled(LogLevel::Critical));
        logger.debug("hidden");
        logger.warn("shown");
    });

    assert!(!output.contains("hidden"));
    assert!(output.contains("shown"));
}

//! ErrorContext conversions into the domain error

use startlog_domain::Error;
use startlog_infrastructure::ErrorContext;
use std::cell::Cell;
use std::io;

fn not_found() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
}

#[test]
fn test_context_produces_generic_error() {
    let err = not_found().context("Loading file").unwrap_err();

    assert!(matches!(err, Error::Generic(_)));
    assert_eq!(err.to_string(), "Generic error: Loading file: gone");
}

#[test]
fn test_io_context_keeps_source() {
    let err = not_found().io_context("Reading config").unwrap_err();

    match &err {
        Error::Io { message, source } => {
            assert_eq!(message, "Reading config: gone");
            assert!(source.is_some());
        }
        other => panic!("Expected Io, got {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_config_context_keeps_source() {
    let err = "not a number"
        .parse::<u32>()
        .config_context("Parsing retries")
        .unwrap_err();

    match err {
        Error::Configuration { message, source } => {
            assert!(message.starts_with("Parsing retries: "));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let calls = Cell::new(0);
    let ok: Result<u8, io::Error> = Ok(1);

    let value = ok
        .with_context(|| {
            calls.set(calls.get() + 1);
            "never built"
        })
        .unwrap();
    assert_eq!(value, 1);
    assert_eq!(calls.get(), 0);

    let err = not_found()
        .with_context(|| {
            calls.set(calls.get() + 1);
            format!("attempt {}", calls.get())
        })
        .unwrap_err();
    assert_eq!(calls.get(), 1);
    assert!(err.to_string().contains("attempt 1: gone"));
}

//! Unit tests for log levels

use startlog_domain::LogLevel;

#[test]
fn test_parse_log_level() {
    assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("Information".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
    assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);

    assert!("verbose".parse::<LogLevel>().is_err());
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Critical);
}

#[test]
fn test_log_level_display_round_trips_through_parse() {
    for level in [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ] {
        assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
    }
}

#[test]
fn test_log_level_serialization() {
    let json = serde_json::to_string(&LogLevel::Warn).expect("serialization failed");
    assert_eq!(json, "\"warn\"");
    let level: LogLevel = serde_json::from_str("\"critical\"").expect("deserialization failed");
    assert_eq!(level, LogLevel::Critical);
}

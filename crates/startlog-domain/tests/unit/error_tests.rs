//! Unit tests for domain error types

use startlog_domain::Error;

trait Greeter {}

#[test]
fn test_missing_required_names_the_type() {
    let error = Error::missing_required::<String>();
    match &error {
        Error::MissingRequiredDependency { type_name } => {
            assert!(type_name.contains("String"));
        }
        _ => panic!("Expected MissingRequiredDependency error"),
    }
    assert!(error.to_string().contains("Missing required dependency"));
}

#[test]
fn test_missing_required_for_trait_object() {
    let error = Error::missing_required::<dyn Greeter>();
    assert!(error.to_string().contains("Greeter"));
}

#[test]
fn test_hook_failed_exposes_root() {
    let error = Error::hook_failed("startup", Error::missing_required::<u32>());
    assert!(error.is_missing_dependency());
    assert!(matches!(error.root(), Error::MissingRequiredDependency { .. }));
    assert!(error.to_string().contains("startup"));
}

#[test]
fn test_nested_hook_failures_unwrap_fully() {
    let inner = Error::hook_failed("inner", Error::registry_closed("late append"));
    let outer = Error::hook_failed("outer", inner);
    assert!(outer.is_registry_closed());
    assert!(!outer.is_missing_dependency());
}

#[test]
fn test_generic_error_display() {
    let error = Error::generic("step exploded");
    assert!(format!("{error}").contains("step exploded"));
    assert!(!error.is_missing_dependency());
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("bad category");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "bad category");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

//! Deferred registry behavior: ordering, categories, logger sharing,
//! failure handling and single-shot replay.

use crate::test_utils::RecordingLoggerFactory;
use startlog_domain::constants::DEFAULT_STARTUP_CATEGORY;
use startlog_domain::ports::{LogLevel, Logger, LoggerFactory};
use startlog_domain::{Error, TriggerOutcome, TriggerState};
use startlog_infrastructure::di::{Optional, Required, ServiceCatalog, ServiceCatalogBuilder};
use startlog_infrastructure::registry::{DeferredLogRegistry, DeferredStep};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct Foo {
    value: u32,
}

struct Unregistered;

fn catalog_with(
    factory: &Arc<RecordingLoggerFactory>,
    configure: impl FnOnce(&mut ServiceCatalogBuilder),
) -> ServiceCatalog {
    let mut builder = ServiceCatalog::builder();
    builder.add_arc::<dyn LoggerFactory>(factory.clone());
    configure(&mut builder);
    builder.build().expect("catalog builds")
}

#[test]
fn test_steps_replay_in_registration_order() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    for i in 0..5 {
        registry
            .message_on_startup(LogLevel::Info, format!("step {i}"))
            .unwrap();
    }

    let outcome = registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    assert_eq!(outcome, TriggerOutcome::Replayed { steps: 5 });
    assert_eq!(
        factory.messages(),
        vec!["step 0", "step 1", "step 2", "step 3", "step 4"]
    );
}

#[test]
fn test_no_step_runs_before_trigger() {
    let runs = Arc::new(AtomicUsize::new(0));
    let registry = DeferredLogRegistry::new();
    let counter = Arc::clone(&runs);
    registry
        .log_on_startup(move |_logger, (): ()| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(registry.pending_len(), 1);
    assert_eq!(registry.state(), TriggerState::NotTriggered);
}

#[test]
fn test_unnamed_steps_use_default_category_at_trigger_time() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry
        .message_on_startup(LogLevel::Info, "unnamed")
        .unwrap();
    registry.set_default_category("First").unwrap();
    registry.set_default_category("Final").unwrap();

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    let records = factory.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "Final");
}

#[test]
fn test_default_category_constant_applies_without_override() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry.message_on_startup(LogLevel::Warn, "hello").unwrap();

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    let records = factory.records();
    assert_eq!(records[0].category, DEFAULT_STARTUP_CATEGORY);
    assert_eq!(records[0].level, LogLevel::Warn);
}

#[test]
fn test_explicit_category_wins_over_default() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry
        .append(DeferredStep::message(LogLevel::Info, "named").with_category("Named"))
        .unwrap();
    registry.set_default_category("Other").unwrap();

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    assert_eq!(factory.records()[0].category, "Named");
}

#[test]
fn test_same_category_shares_logger_instance() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    let seen: Arc<Mutex<Vec<Arc<dyn Logger>>>> = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..3 {
        let seen = Arc::clone(&seen);
        registry
            .log_on_startup_as("X", move |logger, (): ()| {
                seen.lock().unwrap().push(Arc::clone(logger));
                Ok(())
            })
            .unwrap();
    }

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(Arc::ptr_eq(&seen[0], &seen[1]));
    assert!(Arc::ptr_eq(&seen[1], &seen[2]));
    assert_eq!(factory.created(), 1);
    assert!(registry.logger_cache().unwrap().contains("X"));
}

#[test]
fn test_required_dependency_scenario() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    let loggers: Arc<Mutex<Vec<Arc<dyn Logger>>>> = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&loggers);
    registry
        .log_on_startup_as("X", move |logger, foo: Required<Foo>| {
            seen.lock().unwrap().push(Arc::clone(logger));
            logger.info(&format!("A saw foo={}", foo.value));
            Ok(())
        })
        .unwrap();
    let seen = Arc::clone(&loggers);
    registry
        .log_on_startup_as("X", move |logger, (): ()| {
            seen.lock().unwrap().push(Arc::clone(logger));
            logger.info("B ran");
            Ok(())
        })
        .unwrap();

    let catalog = catalog_with(&factory, |services| {
        services.add_value(Foo { value: 7 });
    });
    registry.trigger(&catalog).unwrap();

    assert_eq!(factory.messages(), vec!["A saw foo=7", "B ran"]);
    let loggers = loggers.lock().unwrap();
    assert!(Arc::ptr_eq(&loggers[0], &loggers[1]));
    assert_eq!(loggers[0].category(), "X");
}

#[test]
fn test_missing_required_dependency_aborts_replay() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry.message_on_startup(LogLevel::Info, "before").unwrap();
    registry
        .log_on_startup(|logger, _missing: Required<Unregistered>| {
            logger.info("never");
            Ok(())
        })
        .unwrap();
    registry.message_on_startup(LogLevel::Info, "after").unwrap();

    let err = registry
        .trigger(&catalog_with(&factory, |_| {}))
        .unwrap_err();

    match err {
        Error::MissingRequiredDependency { type_name } => {
            assert!(type_name.contains("Unregistered"));
        }
        other => panic!("Expected MissingRequiredDependency, got {other:?}"),
    }
    assert_eq!(factory.messages(), vec!["before"]);
    assert_eq!(registry.state(), TriggerState::Triggering);
}

#[test]
fn test_missing_optional_dependency_yields_none() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry
        .log_on_startup(|logger, missing: Optional<Unregistered>| {
            logger.info(&format!("present={}", missing.is_present()));
            Ok(())
        })
        .unwrap();

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    assert_eq!(factory.messages(), vec!["present=false"]);
}

#[test]
fn test_mixed_dependency_tuple() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry
        .log_on_startup(
            |logger, (foo, absent, name): (Required<Foo>, Optional<Unregistered>, Required<String>)| {
                logger.info(&format!("{} {} {}", foo.value, absent.is_present(), *name));
                Ok(())
            },
        )
        .unwrap();

    let catalog = catalog_with(&factory, |services| {
        services
            .add_value(Foo { value: 1 })
            .add_value("svc".to_string());
    });
    registry.trigger(&catalog).unwrap();

    assert_eq!(factory.messages(), vec!["1 false svc"]);
}

#[test]
fn test_step_body_failure_propagates_and_halts() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry
        .log_on_startup(|_logger, (): ()| Err(Error::generic("diagnostic blew up")))
        .unwrap();
    registry.message_on_startup(LogLevel::Info, "after").unwrap();

    let err = registry
        .trigger(&catalog_with(&factory, |_| {}))
        .unwrap_err();

    assert!(err.to_string().contains("diagnostic blew up"));
    assert!(factory.messages().is_empty());
}

#[test]
fn test_failed_replay_is_never_retried() {
    let runs = Arc::new(AtomicUsize::new(0));
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    let counter = Arc::clone(&runs);
    registry
        .log_on_startup(move |_logger, (): ()| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::generic("fail once"))
        })
        .unwrap();

    let catalog = catalog_with(&factory, |_| {});
    assert!(registry.trigger(&catalog).is_err());
    assert_eq!(registry.trigger(&catalog).unwrap(), TriggerOutcome::InProgress);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_double_trigger_runs_each_step_once() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    registry.message_on_startup(LogLevel::Info, "only once").unwrap();
    let catalog = catalog_with(&factory, |_| {});

    assert!(registry.trigger(&catalog).unwrap().replayed());
    assert_eq!(
        registry.trigger(&catalog).unwrap(),
        TriggerOutcome::AlreadyTriggered
    );
    assert_eq!(factory.messages(), vec!["only once"]);
    assert_eq!(registry.state(), TriggerState::Triggered);
}

#[test]
fn test_registration_after_trigger_is_rejected() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new();
    let catalog = catalog_with(&factory, |_| {});
    registry.trigger(&catalog).unwrap();

    let err = registry
        .message_on_startup(LogLevel::Info, "too late")
        .unwrap_err();
    assert!(err.is_registry_closed());
    assert!(registry.set_default_category("Late").unwrap_err().is_registry_closed());

    registry.trigger(&catalog).unwrap();
    assert!(factory.messages().is_empty());
}

#[test]
fn test_step_registered_by_a_step_never_runs() {
    let factory = RecordingLoggerFactory::new();
    let registry = Arc::new(DeferredLogRegistry::new());
    let inner = Arc::clone(&registry);
    registry
        .log_on_startup(move |logger, (): ()| {
            let late = inner.message_on_startup(LogLevel::Info, "nested");
            logger.info(&format!("nested rejected={}", late.is_err()));
            Ok(())
        })
        .unwrap();

    registry.trigger(&catalog_with(&factory, |_| {})).unwrap();

    assert_eq!(factory.messages(), vec!["nested rejected=true"]);
}

#[test]
fn test_preset_logger_factory_skips_container_lookup() {
    let factory = RecordingLoggerFactory::new();
    let registry = DeferredLogRegistry::new().with_logger_factory(factory.clone());
    registry.message_on_startup(LogLevel::Debug, "direct").unwrap();

    let empty = ServiceCatalog::builder().build().unwrap();
    registry.trigger(&empty).unwrap();

    assert_eq!(factory.messages(), vec!["direct"]);
}

//! # startlog
//!
//! Deferred startup logging: register log statements (and the services they
//! need) while the application is still being composed, and have them replayed
//! exactly once, in order, when the host starts.
//!
//! ## Example
//!
//! ```ignore
//! use startlog::prelude::*;
//!
//! let mut builder = HostBuilder::from_config(ConfigLoader::new().load()?);
//! builder
//!     .services_mut()
//!     .add_arc::<dyn LoggerFactory>(Arc::new(TracingLoggerFactory::new()));
//!
//! builder.log_on_startup(|logger, Required(config): Required<AppConfig>| {
//!     logger.info(&format!("Log level: {}", config.logging.level));
//!     Ok(())
//! })?;
//!
//! let host = builder.build()?;
//! host.start()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ports, error type and value objects
//! - `infrastructure` - registry, service catalog, host, config and logging

use startlog_domain::ports::LoggerFactory;
use startlog_domain::{LogLevel, Result};
use startlog_infrastructure::config::loader::validate_app_config;
use startlog_infrastructure::config::{AppConfig, ConfigLoader, ConfigSource};
use startlog_infrastructure::error_ext::ErrorContext;
use startlog_infrastructure::logging::init_logging;
use startlog_infrastructure::{HostBuilder, Required, TracingLoggerFactory};
use std::path::PathBuf;
use std::sync::Arc;

/// Domain layer - ports, errors and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use startlog_domain::*;
}

/// Infrastructure layer - registry, catalog, host, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use startlog_infrastructure::*;
}

/// Types needed by a typical composition root
pub mod prelude {
    pub use startlog_domain::ports::{LogLevel, Logger, LoggerFactory};
    pub use startlog_domain::{Error, Result};
    pub use startlog_infrastructure::config::{AppConfig, ConfigLoader, ConfigSource};
    pub use startlog_infrastructure::{
        DeferredLogRegistry, DeferredStep, Host, HostBuilder, Optional, Required,
        ServiceCatalog, StartupHook, TracingLoggerFactory,
    };
    pub use std::sync::Arc;
}

/// Category of the records emitted by the built-in startup report
pub const HOST_CATEGORY: &str = "startlog::host";

/// Options for [`run`]
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Overrides `startup.default_category`
    pub category: Option<String>,
    /// Keep running until Ctrl-C
    pub wait: bool,
}

/// Load configuration, install logging, start a host and replay its startup log
pub async fn run(options: RunOptions) -> Result<()> {
    let RunOptions {
        config: config_path,
        category,
        wait,
    } = options;

    let mut loader = ConfigLoader::new();
    if let Some(path) = &config_path {
        loader = loader.with_config_path(path);
    }
    let (mut config, source) = loader.load_with_source()?;
    if let Some(category) = category {
        config.startup.default_category = category;
    }
    validate_app_config(&config)?;
    init_logging(&config.logging)?;

    let mut builder = HostBuilder::from_config(config);
    builder
        .services_mut()
        .add_arc::<dyn LoggerFactory>(Arc::new(TracingLoggerFactory::new()));
    register_startup_report(&mut builder, source, wait)?;

    let host = builder.build()?;
    host.start()?;

    if wait {
        tokio::signal::ctrl_c()
            .await
            .io_context("Failed to listen for Ctrl-C")?;
        host.signal_shutdown();
        host.wait_for_shutdown().await;
    }
    Ok(())
}

/// Register the steps describing how the process was configured
///
/// `source` is added to the service catalog so the report reflects the file
/// the loader actually merged.
pub fn register_startup_report(
    builder: &mut HostBuilder,
    source: ConfigSource,
    wait: bool,
) -> Result<()> {
    builder.services_mut().add_value(source);
    builder.log_on_startup_as(
        HOST_CATEGORY,
        |logger, Required(source): Required<ConfigSource>| {
            match *source {
                ConfigSource::NotFound(_) => logger.warn(&source.to_string()),
                ConfigSource::File(_) | ConfigSource::Defaults => logger.info(&source.to_string()),
            }
            Ok(())
        },
    )?;

    builder.log_on_startup_as(
        HOST_CATEGORY,
        |logger, Required(config): Required<AppConfig>| {
            logger.info(&format!(
                "Logging level: {}, json: {}",
                config.logging.level, config.logging.json_format
            ));
            Ok(())
        },
    )?;

    builder.log_on_startup(|logger, Required(config): Required<AppConfig>| {
        logger.info(&format!(
            "Default startup category: {}",
            config.startup.default_category
        ));
        Ok(())
    })?;

    if wait {
        builder
            .startup_log()
            .message_on_startup(LogLevel::Info, "Application started. Press Ctrl+C to shut down.")?;
    }
    Ok(())
}

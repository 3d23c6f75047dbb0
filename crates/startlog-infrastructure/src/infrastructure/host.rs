//! Host composition and startup
//!
//! ## Usage
//!
//! ```ignore
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
//! host.start()?; // replays the step above, exactly once
//! host.wait_for_shutdown().await;
//! ```

use crate::config::{AppConfig, StartupConfig};
use crate::di::catalog::{ServiceCatalog, ServiceCatalogBuilder};
use crate::di::resolver::Dependencies;
use crate::infrastructure::hooks::{StartupHook, StartupHooks};
use crate::infrastructure::lifecycle::{DefaultShutdownCoordinator, HostState};
use crate::registry::{DeferredLogRegistry, StartupLogHook};
use crate::utils::TimedOperation;
use startlog_domain::constants::STARTUP_LOG_HOOK_NAME;
use startlog_domain::error::{Error, Result};
use startlog_domain::ports::{Logger, ShutdownCoordinator};
use startlog_domain::value_objects::StepOrdinal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, error, info};

/// Composition-phase builder for a [`Host`]
pub struct HostBuilder {
    services: ServiceCatalogBuilder,
    hooks: StartupHooks,
    startup_log: Option<Arc<DeferredLogRegistry>>,
    startup_config: StartupConfig,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            services: ServiceCatalogBuilder::new(),
            hooks: StartupHooks::new(),
            startup_log: None,
            startup_config: StartupConfig::default(),
        }
    }

    /// Builder seeded from configuration
    ///
    /// The configuration is also registered as a service so steps can
    /// depend on `AppConfig`.
    pub fn from_config(config: AppConfig) -> Self {
        let mut builder = Self::new();
        builder.startup_config = config.startup.clone();
        builder.services.add_value(config);
        builder
    }

    pub fn services_mut(&mut self) -> &mut ServiceCatalogBuilder {
        &mut self.services
    }

    /// Register a startup hook; duplicates by name are ignored
    pub fn add_hook(&mut self, hook: Arc<dyn StartupHook>) -> bool {
        self.hooks.register(hook)
    }

    pub fn hooks(&self) -> &StartupHooks {
        &self.hooks
    }

    /// The deferred log registry, created on first use
    ///
    /// Every call also asks for the registry's startup hook; the hook
    /// collection keeps only the first, so the registry is triggered once.
    pub fn startup_log(&mut self) -> Arc<DeferredLogRegistry> {
        let registry = match &self.startup_log {
            Some(registry) => Arc::clone(registry),
            None => {
                debug!(
                    default_category = %self.startup_config.default_category,
                    "Creating startup log registry"
                );
                let registry = Arc::new(DeferredLogRegistry::with_default_category(
                    self.startup_config.default_category.clone(),
                ));
                self.startup_log = Some(Arc::clone(&registry));
                registry
            }
        };
        self.hooks
            .register(Arc::new(StartupLogHook::new(Arc::clone(&registry))));
        registry
    }

    /// Register a step logging against the default category
    pub fn log_on_startup<D, F>(&mut self, body: F) -> Result<StepOrdinal>
    where
        D: Dependencies + 'static,
        F: FnOnce(&Arc<dyn Logger>, D) -> Result<()> + Send + 'static,
    {
        self.startup_log().log_on_startup(body)
    }

    /// Register a step logging against `category`
    pub fn log_on_startup_as<D, F, S>(&mut self, category: S, body: F) -> Result<StepOrdinal>
    where
        D: Dependencies + 'static,
        F: FnOnce(&Arc<dyn Logger>, D) -> Result<()> + Send + 'static,
        S: Into<String>,
    {
        self.startup_log().log_on_startup_as(category, body)
    }

    /// Change the default category of the startup log registry
    pub fn set_startup_category<S: Into<String>>(&mut self, category: S) -> Result<()> {
        self.startup_log().set_default_category(category)
    }

    /// Finalize the service catalog and produce a host ready to start
    pub fn build(self) -> Result<Host> {
        let Self {
            services,
            mut hooks,
            startup_log,
            startup_config,
        } = self;

        if !startup_config.enabled && hooks.remove(STARTUP_LOG_HOOK_NAME).is_some() {
            info!(
                pending = startup_log.as_ref().map_or(0, |r| r.pending_len()),
                "Startup logging disabled; registered steps will not run"
            );
        }

        let services = Arc::new(services.build()?);
        info!(
            services = services.len(),
            hooks = hooks.len(),
            "Host built"
        );

        Ok(Host {
            services,
            hooks: hooks.into_vec(),
            startup_log,
            state: AtomicU8::new(HostState::Created.as_u8()),
            shutdown: DefaultShutdownCoordinator::new(),
        })
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBuilder")
            .field("services", &self.services)
            .field("hooks", &self.hooks)
            .field("startup_log", &self.startup_log)
            .finish()
    }
}

/// A composed host with a finalized service catalog
pub struct Host {
    services: Arc<ServiceCatalog>,
    hooks: Vec<Arc<dyn StartupHook>>,
    startup_log: Option<Arc<DeferredLogRegistry>>,
    state: AtomicU8,
    shutdown: DefaultShutdownCoordinator,
}

impl Host {
    pub fn builder() -> HostBuilder {
        HostBuilder::new()
    }

    /// Run every startup hook once, in registration order
    ///
    /// Only the first call runs the hooks; later calls return `Ok(())`
    /// without doing anything. A failing hook stops the remaining hooks,
    /// moves the host to [`HostState::Failed`] and is reported as
    /// [`Error::HookFailed`].
    pub fn start(&self) -> Result<()> {
        if let Err(current) = self.state.compare_exchange(
            HostState::Created.as_u8(),
            HostState::Starting.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            debug!(state = ?HostState::from_u8(current), "Host already started");
            return Ok(());
        }

        let timer = TimedOperation::start();
        info!(hooks = self.hooks.len(), "Starting host");
        for hook in &self.hooks {
            if let Err(e) = hook.on_started(&*self.services) {
                error!(hook = hook.name(), error = %e, "Startup hook failed");
                self.state
                    .store(HostState::Failed.as_u8(), Ordering::Release);
                return Err(Error::hook_failed(hook.name(), e));
            }
        }

        self.state
            .store(HostState::Running.as_u8(), Ordering::Release);
        info!(elapsed_ms = timer.elapsed_ms(), "Host started");
        Ok(())
    }

    pub fn state(&self) -> HostState {
        HostState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn services(&self) -> &Arc<ServiceCatalog> {
        &self.services
    }

    /// The startup log registry, if any step was registered through the builder
    pub fn startup_log(&self) -> Option<&Arc<DeferredLogRegistry>> {
        self.startup_log.as_ref()
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.signal_shutdown();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_shutting_down()
    }

    pub async fn wait_for_shutdown(&self) {
        self.shutdown.wait_for_shutdown().await;
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("state", &self.state())
            .field(
                "hooks",
                &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .field("services", &self.services)
            .finish()
    }
}

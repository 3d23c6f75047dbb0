//! Startup hook adapter for the deferred registry

use crate::di::catalog::ServiceCatalog;
use crate::infrastructure::hooks::StartupHook;
use crate::registry::deferred::DeferredLogRegistry;
use startlog_domain::constants::STARTUP_LOG_HOOK_NAME;
use startlog_domain::error::Result;
use std::sync::Arc;

/// Triggers a [`DeferredLogRegistry`] when the host starts
///
/// Every instance shares the same hook name, so a host keeps only the first
/// one registered regardless of how many call sites asked for it.
#[derive(Debug, Clone)]
pub struct StartupLogHook {
    registry: Arc<DeferredLogRegistry>,
}

impl StartupLogHook {
    pub fn new(registry: Arc<DeferredLogRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<DeferredLogRegistry> {
        &self.registry
    }
}

impl StartupHook for StartupLogHook {
    fn name(&self) -> &str {
        STARTUP_LOG_HOOK_NAME
    }

    fn on_started(&self, services: &ServiceCatalog) -> Result<()> {
        self.registry.trigger(services).map(|_| ())
    }
}

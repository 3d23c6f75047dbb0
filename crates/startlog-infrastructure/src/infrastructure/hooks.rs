//! Startup hook collection
//!
//! Hooks are kept in registration order and de-duplicated by name, so any
//! number of call sites asking for the same hook yield a single execution.

use crate::di::catalog::ServiceCatalog;
use startlog_domain::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Work run once when the host starts, after the catalog is finalized
pub trait StartupHook: Send + Sync {
    /// Stable name; a host keeps one hook per name
    fn name(&self) -> &str;

    /// Run against the finalized service catalog
    fn on_started(&self, services: &ServiceCatalog) -> Result<()>;
}

#[derive(Default)]
pub struct StartupHooks {
    names: HashSet<String>,
    hooks: Vec<Arc<dyn StartupHook>>,
}

impl StartupHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `hook` unless one with the same name is already registered
    ///
    /// Returns `true` when the hook was added.
    pub fn register(&mut self, hook: Arc<dyn StartupHook>) -> bool {
        let name = hook.name().to_string();
        if !self.names.insert(name.clone()) {
            debug!(hook = %name, "Startup hook already registered");
            return false;
        }
        debug!(hook = %name, "Startup hook registered");
        self.hooks.push(hook);
        true
    }

    /// Remove the hook registered under `name`
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn StartupHook>> {
        if !self.names.remove(name) {
            return None;
        }
        let index = self.hooks.iter().position(|hook| hook.name() == name)?;
        Some(self.hooks.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|hook| hook.name())
    }

    pub(crate) fn into_vec(self) -> Vec<Arc<dyn StartupHook>> {
        self.hooks
    }
}

impl std::fmt::Debug for StartupHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

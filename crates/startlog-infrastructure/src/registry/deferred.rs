//! Deferred Log Registry
//!
//! Collects logging steps during composition and replays them exactly once,
//! in registration order, when the host starts.
//!
//! ## Lifecycle
//!
//! ```text
//! NotTriggered ──trigger()──▶ Triggering ──all steps ok──▶ Triggered
//!      │                          │
//!  append / set_default       step fails: stays here,
//!  accepted                   never replayed again
//! ```
//!
//! The default category is read once, when replay begins. Renaming it after
//! appending an unnamed step therefore still changes that step's category.
//!
//! The logger cache is built on first trigger from the `LoggerFactory`
//! registered in the final container, unless the registry was created with
//! [`DeferredLogRegistry::with_logger_factory`].

use crate::di::catalog::ServiceCatalog;
use crate::di::resolver::{Dependencies, ResolutionContext};
use crate::registry::cache::LoggerCache;
use crate::registry::step::{DeferredStep, RegisteredStep};
use crate::utils::TimedOperation;
use startlog_domain::constants::DEFAULT_STARTUP_CATEGORY;
use startlog_domain::error::{Error, Result};
use startlog_domain::ports::{LogLevel, Logger, LoggerFactory};
use startlog_domain::value_objects::{StepOrdinal, TriggerOutcome, TriggerState};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use tracing::{debug, error, info, warn};

#[derive(Default)]
struct StepQueue {
    next_ordinal: u64,
    steps: Vec<RegisteredStep>,
}

impl StepQueue {
    fn push(&mut self, step: DeferredStep) -> StepOrdinal {
        let ordinal = StepOrdinal::new(self.next_ordinal);
        self.next_ordinal += 1;
        self.steps.push(step.register(ordinal));
        ordinal
    }
}

/// Ordered registry of deferred startup log steps
pub struct DeferredLogRegistry {
    default_category: RwLock<String>,
    state: AtomicU8,
    queue: Mutex<StepQueue>,
    logger_cache: OnceLock<LoggerCache>,
}

impl DeferredLogRegistry {
    /// Registry using [`DEFAULT_STARTUP_CATEGORY`] for unnamed steps
    pub fn new() -> Self {
        Self::with_default_category(DEFAULT_STARTUP_CATEGORY)
    }

    pub fn with_default_category<S: Into<String>>(category: S) -> Self {
        Self {
            default_category: RwLock::new(category.into()),
            state: AtomicU8::new(TriggerState::NotTriggered.as_u8()),
            queue: Mutex::new(StepQueue::default()),
            logger_cache: OnceLock::new(),
        }
    }

    /// Registry whose loggers come from `factory` instead of the container
    pub fn with_logger_factory(self, factory: Arc<dyn LoggerFactory>) -> Self {
        Self {
            logger_cache: OnceLock::from(LoggerCache::new(factory)),
            ..self
        }
    }

    /// Append a step; its ordinal fixes its position in the replay
    pub fn append(&self, step: DeferredStep) -> Result<StepOrdinal> {
        let mut queue = self.lock_queue();
        if !self.state().accepts_registrations() {
            warn!(
                category = step.category(),
                "Rejected startup log step registered after replay began"
            );
            return Err(Error::registry_closed(
                "cannot append a startup log step after replay has begun",
            ));
        }

        let category = step.category().map(str::to_string);
        let ordinal = queue.push(step);
        debug!(%ordinal, category = category.as_deref(), "Startup log step registered");
        Ok(ordinal)
    }

    /// Register a body that resolves `D` and logs against the default category
    pub fn log_on_startup<D, F>(&self, body: F) -> Result<StepOrdinal>
    where
        D: Dependencies + 'static,
        F: FnOnce(&Arc<dyn Logger>, D) -> Result<()> + Send + 'static,
    {
        self.append(DeferredStep::new(body))
    }

    /// Register a body that resolves `D` and logs against `category`
    pub fn log_on_startup_as<D, F, S>(&self, category: S, body: F) -> Result<StepOrdinal>
    where
        D: Dependencies + 'static,
        F: FnOnce(&Arc<dyn Logger>, D) -> Result<()> + Send + 'static,
        S: Into<String>,
    {
        self.append(DeferredStep::new(body).with_category(category))
    }

    /// Register a fixed message at `level` against the default category
    pub fn message_on_startup<S: Into<String>>(
        &self,
        level: LogLevel,
        message: S,
    ) -> Result<StepOrdinal> {
        self.append(DeferredStep::message(level, message))
    }

    /// Change the category used by steps without an explicit one
    pub fn set_default_category<S: Into<String>>(&self, category: S) -> Result<()> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(Error::invalid_argument(
                "startup log category cannot be empty",
            ));
        }

        let mut current = self
            .default_category
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.state().accepts_registrations() {
            return Err(Error::registry_closed(
                "cannot change the default category after replay has begun",
            ));
        }
        debug!(from = %current.as_str(), to = %category, "Default startup log category changed");
        *current = category;
        Ok(())
    }

    pub fn default_category(&self) -> String {
        self.default_category
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> TriggerState {
        TriggerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Steps waiting for the trigger
    pub fn pending_len(&self) -> usize {
        self.lock_queue().steps.len()
    }

    /// Logger cache, once the registry has been triggered or given a factory
    pub fn logger_cache(&self) -> Option<&LoggerCache> {
        self.logger_cache.get()
    }

    /// Replay every pending step exactly once, in registration order
    ///
    /// Only the first call replays. Later or concurrent calls return
    /// [`TriggerOutcome::AlreadyTriggered`] or [`TriggerOutcome::InProgress`]
    /// without running anything. The first failing step aborts the replay and
    /// its error is returned unchanged; the registry then stays in
    /// [`TriggerState::Triggering`].
    pub fn trigger(&self, services: &ServiceCatalog) -> Result<TriggerOutcome> {
        if let Err(current) = self.state.compare_exchange(
            TriggerState::NotTriggered.as_u8(),
            TriggerState::Triggering.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            let state = TriggerState::from_u8(current);
            debug!(?state, "Startup log registry already triggered; skipping replay");
            return Ok(match state {
                TriggerState::Triggered => TriggerOutcome::AlreadyTriggered,
                _ => TriggerOutcome::InProgress,
            });
        }

        let steps = std::mem::take(&mut self.lock_queue().steps);
        let default_category = self.default_category();
        let timer = TimedOperation::start();
        info!(
            steps = steps.len(),
            default_category = %default_category,
            "Replaying startup log steps"
        );

        let cache = self.resolve_logger_cache(services)?;
        let total = steps.len();
        for RegisteredStep {
            ordinal,
            category,
            body,
        } in steps
        {
            let category = category.as_deref().unwrap_or(&default_category);
            let logger = cache.get_or_create(category);
            let context = ResolutionContext::new(services);
            if let Err(e) = body(&logger, &context) {
                error!(%ordinal, category, error = %e, "Startup log step failed; aborting replay");
                return Err(e);
            }
        }

        self.state
            .store(TriggerState::Triggered.as_u8(), Ordering::Release);
        info!(
            steps = total,
            elapsed_ms = timer.elapsed_ms(),
            "Startup log replay complete"
        );
        Ok(TriggerOutcome::Replayed { steps: total })
    }

    fn resolve_logger_cache(&self, services: &ServiceCatalog) -> Result<&LoggerCache> {
        if let Some(cache) = self.logger_cache.get() {
            return Ok(cache);
        }
        let factory = ResolutionContext::new(services)
            .required::<dyn LoggerFactory>()
            .inspect_err(|e| error!(error = %e, "No logger factory available for startup logs"))?;
        Ok(self.logger_cache.get_or_init(|| LoggerCache::new(factory)))
    }

    fn lock_queue(&self) -> MutexGuard<'_, StepQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DeferredLogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DeferredLogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredLogRegistry")
            .field("default_category", &self.default_category())
            .field("state", &self.state())
            .field("pending", &self.pending_len())
            .finish()
    }
}

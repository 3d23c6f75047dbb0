//! Deferred steps
//!
//! A step pairs an optional logger category with a body that runs once the
//! registry is triggered. The body's dependency set is a type parameter; it
//! is resolved against the final container right before the body runs.

use crate::di::resolver::{Dependencies, ResolutionContext};
use startlog_domain::error::Result;
use startlog_domain::ports::{LogLevel, Logger};
use startlog_domain::value_objects::StepOrdinal;
use std::sync::Arc;

pub(crate) type StepBody =
    Box<dyn FnOnce(&Arc<dyn Logger>, &ResolutionContext<'_>) -> Result<()> + Send>;

/// A unit of deferred logging work, not yet appended to a registry
pub struct DeferredStep {
    category: Option<String>,
    body: StepBody,
}

impl DeferredStep {
    /// Step that resolves `D` and runs `body` against the default category's logger
    ///
    /// ```ignore
    /// let step = DeferredStep::new(|logger, Required(config): Required<AppConfig>| {
    ///     logger.info(&format!("Log level: {}", config.logging.level));
    ///     Ok(())
    /// });
    /// ```
    pub fn new<D, F>(body: F) -> Self
    where
        D: Dependencies + 'static,
        F: FnOnce(&Arc<dyn Logger>, D) -> Result<()> + Send + 'static,
    {
        let body: StepBody = Box::new(
            move |logger: &Arc<dyn Logger>, context: &ResolutionContext<'_>| {
                let dependencies = context.resolve_all::<D>()?;
                body(logger, dependencies)
            },
        );
        Self {
            category: None,
            body,
        }
    }

    /// Step that logs a fixed message and needs no dependencies
    pub fn message<S: Into<String>>(level: LogLevel, message: S) -> Self {
        let message = message.into();
        Self::new(move |logger, (): ()| {
            logger.log(level, &message);
            Ok(())
        })
    }

    /// Pin the step to an explicit logger category
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Explicit category, if any
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub(crate) fn register(self, ordinal: StepOrdinal) -> RegisteredStep {
        RegisteredStep {
            ordinal,
            category: self.category,
            body: self.body,
        }
    }
}

impl std::fmt::Debug for DeferredStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredStep")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A step owned by a registry, with its ordinal assigned
pub(crate) struct RegisteredStep {
    pub(crate) ordinal: StepOrdinal,
    pub(crate) category: Option<String>,
    pub(crate) body: StepBody,
}

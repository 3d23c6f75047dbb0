//! Logger Cache
//!
//! Category name → logger, backed by a [`LoggerFactory`]. Construction goes
//! through the `DashMap` entry API, so concurrent first requests for the same
//! category create exactly one logger and every caller observes it fully
//! built. Entries are never evicted.

use dashmap::DashMap;
use startlog_domain::ports::{Logger, LoggerFactory};
use std::sync::Arc;
use tracing::debug;

pub struct LoggerCache {
    factory: Arc<dyn LoggerFactory>,
    loggers: DashMap<String, Arc<dyn Logger>>,
}

impl LoggerCache {
    pub fn new(factory: Arc<dyn LoggerFactory>) -> Self {
        Self {
            factory,
            loggers: DashMap::new(),
        }
    }

    /// Return the logger for `category`, creating it on first request
    pub fn get_or_create(&self, category: &str) -> Arc<dyn Logger> {
        if let Some(existing) = self.loggers.get(category) {
            return Arc::clone(existing.value());
        }

        let entry = self
            .loggers
            .entry(category.to_string())
            .or_insert_with(|| {
                debug!(category, "Creating logger");
                self.factory.create_logger(category)
            });
        Arc::clone(entry.value())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.loggers.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl std::fmt::Debug for LoggerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerCache")
            .field(
                "categories",
                &self
                    .loggers
                    .iter()
                    .map(|e| e.key().clone())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

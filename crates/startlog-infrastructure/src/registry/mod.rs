//! Deferred Startup Log Registry
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`step`] | Deferred steps and their bodies |
//! | [`cache`] | Category-keyed logger cache |
//! | [`deferred`] | The registry and its single-shot trigger |
//! | [`hook`] | Adapter that lets a host trigger the registry |

pub mod cache;
pub mod deferred;
pub mod hook;
pub mod step;

pub use cache::LoggerCache;
pub use deferred::DeferredLogRegistry;
pub use hook::StartupLogHook;
pub use step::DeferredStep;

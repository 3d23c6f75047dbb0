//! # Infrastructure Layer
//!
//! Runtime behavior for deferred startup logging: the registry and its
//! trigger, the service catalog it resolves dependencies from, the host that
//! fires it, and the ambient configuration and logging stack.
//!
//! ## Module Categories
//!
//! ### Deferred Logging
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Deferred steps, logger cache, single-shot trigger |
//! | [`adapters`] | `tracing`-backed logger factory |
//!
//! ### Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Service catalog and required/optional resolution |
//! | [`infrastructure`] | Host builder, startup hooks, shutdown |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration with TOML and env layers |
//! | [`logging`] | Subscriber installation with tracing |
//! | [`constants`] | Centralized configuration constants |

pub mod adapters;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod infrastructure;
pub mod logging;
pub mod registry;
pub mod utils;

pub use adapters::{TracingLogger, TracingLoggerFactory};
pub use di::{Optional, Required, ResolutionContext, ServiceCatalog, ServiceCatalogBuilder};
pub use error_ext::ErrorContext;
pub use infrastructure::{Host, HostBuilder, HostState, StartupHook};
pub use registry::{DeferredLogRegistry, DeferredStep, LoggerCache, StartupLogHook};

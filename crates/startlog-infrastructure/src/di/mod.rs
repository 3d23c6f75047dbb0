//! Dependency Injection - Service Catalog and Resolution
//!
//! ```text
//! composition phase                    runtime start
//! ─────────────────                    ─────────────
//! ServiceCatalogBuilder::add_value  →  build() → ServiceCatalog (dill::Catalog)
//!                      ::configure                    ↓
//!                                          ResolutionContext::required / optional
//! ```

pub mod catalog;
pub mod resolver;

pub use catalog::{ServiceCatalog, ServiceCatalogBuilder};
pub use resolver::{Dependencies, Dependency, MissingPolicy, Optional, Required, ResolutionContext};

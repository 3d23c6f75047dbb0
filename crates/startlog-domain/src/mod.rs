//! # startlog Domain Layer
//!
//! Boundary contracts and core types for deferred startup logging.
//!
//! The domain crate has no runtime behavior of its own. It defines the ports
//! the infrastructure layer consumes (logger construction, shutdown
//! signalling), the error taxonomy shared by every layer, and the small value
//! objects that describe registry and trigger state.
//!
//! ## Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Well-known category names and hook names |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`ports`] | Traits implemented by logger factories and shutdown coordinators |
//! | [`value_objects`] | Step ordinals, trigger state and trigger outcome |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{LogLevel, Logger, LoggerFactory, ShutdownCoordinator};
pub use value_objects::{StepOrdinal, TriggerOutcome, TriggerState};

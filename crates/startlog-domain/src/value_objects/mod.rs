//! Value Objects
//!
//! Small immutable types describing registry and trigger state.

/// Step ordinals
pub mod step;
/// Trigger state machine and outcomes
pub mod trigger;

pub use step::StepOrdinal;
pub use trigger::{TriggerOutcome, TriggerState};

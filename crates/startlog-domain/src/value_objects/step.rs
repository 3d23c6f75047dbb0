//! Step ordinal value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a step in registration order
///
/// Ordinals are assigned when a step is appended, start at zero and increase
/// by one per append. Replay runs steps in ascending ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepOrdinal(u64);

impl StepOrdinal {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

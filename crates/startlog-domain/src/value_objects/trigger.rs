//! Trigger state machine

use serde::{Deserialize, Serialize};

/// Lifecycle of a deferred registry
///
/// `NotTriggered -> Triggering -> Triggered`. A failure during replay leaves
/// the registry in `Triggering` permanently; there is no path back to
/// `NotTriggered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TriggerState {
    #[default]
    NotTriggered = 0,
    Triggering = 1,
    Triggered = 2,
}

impl TriggerState {
    /// Decode a state stored in an atomic
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NotTriggered,
            1 => Self::Triggering,
            _ => Self::Triggered,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the registry still accepts new steps
    pub fn accepts_registrations(self) -> bool {
        self == Self::NotTriggered
    }
}

/// Result of a call to trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOutcome {
    /// This call performed the replay and every step completed
    Replayed {
        /// Number of steps executed
        steps: usize,
    },
    /// Replay is running on another caller, or stopped after a failure
    InProgress,
    /// Replay already completed; nothing was executed
    AlreadyTriggered,
}

impl TriggerOutcome {
    /// Whether this call executed the steps
    pub fn replayed(self) -> bool {
        matches!(self, Self::Replayed { .. })
    }
}

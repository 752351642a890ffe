//! Timer identity — what a timer is for and which arming it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The logical purpose of a timer. A light has at most one live timer per
/// purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPurpose {
    /// Indoor: switch off after occupancy ended.
    AutoOff,
    /// Indoor: lift a temporary sensor suppression.
    SensorSuppression,
    /// Outdoor: switch off after an occupancy-triggered on.
    Motion,
}

impl fmt::Display for TimerPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoOff => f.write_str("auto_off"),
            Self::SensorSuppression => f.write_str("sensor_suppression"),
            Self::Motion => f.write_str("motion"),
        }
    }
}

/// Opaque handle returned when a timer is armed. Handles are never reused
/// by one timer service, so a stale fire can be told apart from the
/// current arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Delivered back to the owning light when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub purpose: TimerPurpose,
    pub handle: TimerHandle,
}

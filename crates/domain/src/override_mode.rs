//! Override mode — automatic control versus an indefinite manual hold.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether timers and occupancy may switch the light.
///
/// While [`ManualHold`](Self::ManualHold) is set, no timer-driven auto-off
/// may fire and occupancy-ended arms nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    #[default]
    Automatic,
    ManualHold,
}

impl OverrideMode {
    #[must_use]
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

impl fmt::Display for OverrideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => f.write_str("automatic"),
            Self::ManualHold => f.write_str("manual_hold"),
        }
    }
}

//! Status snapshot — a read-only view of one light's decision state.

use serde::Serialize;

use crate::override_mode::OverrideMode;
use crate::sensor_gate::SensorGate;
use crate::time::MinuteOfDay;

/// Point-in-time view of a decision core, published after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum LightStatus {
    Indoor {
        override_mode: OverrideMode,
        sensor_gate: SensorGate,
        auto_off_armed: bool,
        suppression_armed: bool,
    },
    Outdoor {
        time_window_active: bool,
        sunrise_minute: Option<MinuteOfDay>,
        motion_armed: bool,
    },
    Remote {
        /// Inputs currently in a dim cycle.
        dimming_inputs: Vec<u8>,
    },
}

impl LightStatus {
    /// Variant name, as used in the serialized `variant` tag.
    #[must_use]
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Indoor { .. } => "indoor",
            Self::Outdoor { .. } => "outdoor",
            Self::Remote { .. } => "remote",
        }
    }
}

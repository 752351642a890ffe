//! Sensor gate — whether occupancy events are currently honored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Occupancy gating, independent of the light's on/off state.
///
/// `SuppressedUntil` never expires by itself: a single reversion timer owned
/// by the decision core flips it back to [`Active`](Self::Active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "until", rename_all = "snake_case")]
pub enum SensorGate {
    #[default]
    Active,
    SuppressedUntil(Timestamp),
    DisabledIndefinitely,
}

impl SensorGate {
    /// Occupancy events are honored only while the gate is active.
    #[must_use]
    pub fn honors_occupancy(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Deadline of a temporary suppression, if any.
    #[must_use]
    pub fn suppressed_until(&self) -> Option<Timestamp> {
        match self {
            Self::SuppressedUntil(until) => Some(*until),
            _ => None,
        }
    }
}

impl fmt::Display for SensorGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::SuppressedUntil(until) => write!(f, "suppressed until {}", until.to_rfc3339()),
            Self::DisabledIndefinitely => f.write_str("disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn should_honor_occupancy_only_when_active() {
        let until = Utc.with_ymd_and_hms(2025, 1, 1, 8, 2, 0).unwrap();
        assert!(SensorGate::Active.honors_occupancy());
        assert!(!SensorGate::SuppressedUntil(until).honors_occupancy());
        assert!(!SensorGate::DisabledIndefinitely.honors_occupancy());
    }

    #[test]
    fn should_expose_suppression_deadline() {
        let until = Utc.with_ymd_and_hms(2025, 1, 1, 8, 2, 0).unwrap();
        assert_eq!(SensorGate::SuppressedUntil(until).suppressed_until(), Some(until));
        assert_eq!(SensorGate::Active.suppressed_until(), None);
    }

    #[test]
    fn should_serialize_with_state_tag() {
        let json = serde_json::to_value(SensorGate::DisabledIndefinitely).unwrap();
        assert_eq!(json, serde_json::json!({"state": "disabled_indefinitely"}));
    }
}

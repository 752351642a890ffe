//! Input event — a normalized button press or occupancy transition.
//!
//! Controllers report their inputs with native names (`single_push`,
//! `btn_up`, `toggle` + state). Everything is folded into [`InputKind`]
//! here; a kind nobody recognizes deserializes to `None` instead of failing,
//! so the decision cores can ignore it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// What happened on an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    SinglePress,
    DoublePress,
    LongPress,
    ButtonDown,
    ButtonUp,
    OccupancyOn,
    OccupancyOff,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SinglePress => "single_press",
            Self::DoublePress => "double_press",
            Self::LongPress => "long_press",
            Self::ButtonDown => "button_down",
            Self::ButtonUp => "button_up",
            Self::OccupancyOn => "occupancy_on",
            Self::OccupancyOff => "occupancy_off",
        })
    }
}

/// Returned when an event name is not a known input kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInputKind;

impl FromStr for InputKind {
    type Err = UnknownInputKind;

    /// Accepts both the normalized names and the controller-native ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_press" | "single_push" => Ok(Self::SinglePress),
            "double_press" | "double_push" => Ok(Self::DoublePress),
            "long_press" | "long_push" => Ok(Self::LongPress),
            "button_down" | "btn_down" => Ok(Self::ButtonDown),
            "button_up" | "btn_up" => Ok(Self::ButtonUp),
            "occupancy_on" => Ok(Self::OccupancyOn),
            "occupancy_off" => Ok(Self::OccupancyOff),
            _ => Err(UnknownInputKind),
        }
    }
}

/// One event from one input of an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub input_id: u8,
    /// `None` when the source sent no kind or one we do not know.
    #[serde(default, deserialize_with = "lenient_kind")]
    pub kind: Option<InputKind>,
}

impl InputEvent {
    #[must_use]
    pub fn new(input_id: u8, kind: InputKind) -> Self {
        Self {
            input_id,
            kind: Some(kind),
        }
    }

    /// Normalize a controller-native event.
    ///
    /// `toggle` carries the new input level in `state` and is how occupancy
    /// sensors wired to a plain input report; it becomes
    /// [`OccupancyOn`](InputKind::OccupancyOn) / [`OccupancyOff`](InputKind::OccupancyOff).
    #[must_use]
    pub fn from_native(input_id: u8, event: Option<&str>, state: Option<bool>) -> Self {
        let kind = match (event, state) {
            (Some("toggle"), Some(true)) => Some(InputKind::OccupancyOn),
            (Some("toggle"), Some(false)) => Some(InputKind::OccupancyOff),
            (Some(name), _) => name.parse().ok(),
            (None, _) => None,
        };
        Self { input_id, kind }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "input {}: {kind}", self.input_id),
            None => write!(f, "input {}: <unrecognized>", self.input_id),
        }
    }
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<InputKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| name.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_native_event_names() {
        assert_eq!("single_push".parse(), Ok(InputKind::SinglePress));
        assert_eq!("long_push".parse(), Ok(InputKind::LongPress));
        assert_eq!("btn_up".parse(), Ok(InputKind::ButtonUp));
        assert_eq!("double_press".parse(), Ok(InputKind::DoublePress));
        assert_eq!("triple_push".parse::<InputKind>(), Err(UnknownInputKind));
    }

    #[test]
    fn should_map_toggle_state_to_occupancy() {
        let on = InputEvent::from_native(2, Some("toggle"), Some(true));
        let off = InputEvent::from_native(2, Some("toggle"), Some(false));
        assert_eq!(on.kind, Some(InputKind::OccupancyOn));
        assert_eq!(off.kind, Some(InputKind::OccupancyOff));
    }

    #[test]
    fn should_leave_toggle_without_state_unrecognized() {
        let event = InputEvent::from_native(2, Some("toggle"), None);
        assert_eq!(event.kind, None);
    }

    #[test]
    fn should_deserialize_unknown_kind_as_none() {
        let event: InputEvent =
            serde_json::from_str(r#"{"input_id": 1, "kind": "wiggle"}"#).unwrap();
        assert_eq!(event.input_id, 1);
        assert_eq!(event.kind, None);
    }

    #[test]
    fn should_deserialize_missing_kind_as_none() {
        let event: InputEvent = serde_json::from_str(r#"{"input_id": 3}"#).unwrap();
        assert_eq!(event.kind, None);
    }

    #[test]
    fn should_deserialize_known_kind() {
        let event: InputEvent =
            serde_json::from_str(r#"{"input_id": 0, "kind": "occupancy_on"}"#).unwrap();
        assert_eq!(event, InputEvent::new(0, InputKind::OccupancyOn));
    }

    #[test]
    fn should_display_event() {
        assert_eq!(
            InputEvent::new(1, InputKind::LongPress).to_string(),
            "input 1: long_press"
        );
    }
}

//! Command — the single one-way instruction sent to a controller channel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::target::ActuationKind;

/// Target brightness as a percentage, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    /// 100 %.
    pub const FULL: Self = Self(100);

    /// Wrap a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] above 100.
    pub fn new(percent: u8) -> Result<Self, ValidationError> {
        if percent <= 100 {
            Ok(Self(percent))
        } else {
            Err(ValidationError::BrightnessOutOfRange(percent))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

/// Direction of a dim step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimDirection {
    Up,
    Down,
}

impl DimDirection {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for DimDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// A one-shot instruction for a single controller channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightCommand {
    /// Set the output on or off, optionally at a brightness.
    Set {
        on: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        brightness: Option<Brightness>,
    },
    /// Flip the output.
    Toggle,
    /// Start dimming in one direction until [`DimStop`](Self::DimStop).
    DimStep { direction: DimDirection },
    /// Stop a running dim step.
    DimStop,
}

impl LightCommand {
    /// Turn on, optionally at a brightness.
    #[must_use]
    pub fn on(brightness: Option<Brightness>) -> Self {
        Self::Set {
            on: true,
            brightness,
        }
    }

    /// Turn off.
    #[must_use]
    pub fn off() -> Self {
        Self::Set {
            on: false,
            brightness: None,
        }
    }

    /// Check the command can be carried out by a channel of `kind`.
    ///
    /// # Errors
    ///
    /// Dim steps and stops need a dimmer; a switch rejects them with
    /// [`ValidationError::UnsupportedCommand`].
    pub fn validate_for(&self, kind: ActuationKind) -> Result<(), ValidationError> {
        match (self, kind) {
            (Self::DimStep { .. } | Self::DimStop, ActuationKind::Switch) => {
                Err(ValidationError::UnsupportedCommand {
                    command: self.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for LightCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set {
                on,
                brightness: Some(b),
            } => write!(f, "set({}, {}%)", if *on { "on" } else { "off" }, b.get()),
            Self::Set {
                on,
                brightness: None,
            } => write!(f, "set({})", if *on { "on" } else { "off" }),
            Self::Toggle => f.write_str("toggle"),
            Self::DimStep { direction } => write!(f, "dim_step({direction})"),
            Self::DimStop => f.write_str("dim_stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_brightness_above_hundred() {
        assert_eq!(
            Brightness::new(101),
            Err(ValidationError::BrightnessOutOfRange(101))
        );
        assert_eq!(Brightness::new(100), Ok(Brightness::FULL));
    }

    #[test]
    fn should_flip_dim_direction() {
        assert_eq!(DimDirection::Up.flipped(), DimDirection::Down);
        assert_eq!(DimDirection::Down.flipped(), DimDirection::Up);
    }

    #[test]
    fn should_display_commands() {
        assert_eq!(LightCommand::on(Some(Brightness::FULL)).to_string(), "set(on, 100%)");
        assert_eq!(LightCommand::off().to_string(), "set(off)");
        assert_eq!(LightCommand::Toggle.to_string(), "toggle");
        assert_eq!(
            LightCommand::DimStep {
                direction: DimDirection::Down
            }
            .to_string(),
            "dim_step(down)"
        );
    }

    #[test]
    fn should_reject_dim_commands_for_switch() {
        let step = LightCommand::DimStep {
            direction: DimDirection::Up,
        };
        assert!(step.validate_for(ActuationKind::Switch).is_err());
        assert!(LightCommand::DimStop.validate_for(ActuationKind::Switch).is_err());
        assert!(step.validate_for(ActuationKind::Dimmer).is_ok());
        assert!(LightCommand::Toggle.validate_for(ActuationKind::Switch).is_ok());
    }

    #[test]
    fn should_serialize_set_command_with_brightness() {
        let json = serde_json::to_value(LightCommand::on(Some(Brightness::FULL))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "set", "on": true, "brightness": 100})
        );
    }
}

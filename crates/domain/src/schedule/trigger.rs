//! Schedule trigger — which of the five daily trigger points fired.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tag carried by a schedule entry and delivered back when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleTrigger {
    /// Fixed morning time; turns on only if sunrise is still far enough away.
    #[serde(rename = "MORNING_ON")]
    MorningOn,
    /// At sunrise; records the minute-of-day for the next morning decision.
    #[serde(rename = "CAPTURE_SUNRISE")]
    CaptureSunrise,
    /// Shortly after sunrise.
    #[serde(rename = "MORNING_OFF")]
    MorningOff,
    /// Shortly before sunset.
    #[serde(rename = "EVENING_ON")]
    EveningOn,
    /// Fixed evening time.
    #[serde(rename = "EVENING_OFF")]
    EveningOff,
}

impl ScheduleTrigger {
    /// All triggers, in installation order.
    pub const ALL: [Self; 5] = [
        Self::MorningOn,
        Self::CaptureSunrise,
        Self::MorningOff,
        Self::EveningOn,
        Self::EveningOff,
    ];

    /// The wire tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::MorningOn => "MORNING_ON",
            Self::CaptureSunrise => "CAPTURE_SUNRISE",
            Self::MorningOff => "MORNING_OFF",
            Self::EveningOn => "EVENING_ON",
            Self::EveningOff => "EVENING_OFF",
        }
    }
}

impl fmt::Display for ScheduleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ScheduleTrigger {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.tag() == s)
            .ok_or_else(|| ValidationError::UnknownTrigger(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_tag_back() {
        for trigger in ScheduleTrigger::ALL {
            assert_eq!(trigger.tag().parse::<ScheduleTrigger>(), Ok(trigger));
        }
    }

    #[test]
    fn should_reject_unknown_tag() {
        assert_eq!(
            "NOON".parse::<ScheduleTrigger>(),
            Err(ValidationError::UnknownTrigger("NOON".to_string()))
        );
    }

    #[test]
    fn should_serialize_as_tag() {
        let json = serde_json::to_string(&ScheduleTrigger::CaptureSunrise).unwrap();
        assert_eq!(json, "\"CAPTURE_SUNRISE\"");
    }
}

//! Schedule plan — the five entries an outdoor light installs at startup.

use serde::{Deserialize, Serialize};

use super::{ScheduleTrigger, TimeSpec};
use crate::error::ValidationError;
use crate::time::MinuteOfDay;

/// One schedule slot on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Slot id on the controller's scheduler.
    pub slot: u32,
    pub timespec: TimeSpec,
    pub trigger: ScheduleTrigger,
    /// Human-readable label used in logs.
    pub description: String,
}

/// Parameters of an outdoor light's daily window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePlan {
    /// Fixed morning-on time.
    pub morning_on: MinuteOfDay,
    /// Morning-off, relative to sunrise.
    pub morning_off_sunrise_offset: i16,
    /// Evening-on, relative to sunset.
    pub evening_on_sunset_offset: i16,
    /// Fixed evening-off time.
    pub evening_off: MinuteOfDay,
    /// Slot id of the first entry; the others follow consecutively.
    pub first_slot: u32,
}

impl Default for SchedulePlan {
    fn default() -> Self {
        Self {
            morning_on: MinuteOfDay::from_hm(6, 0).unwrap_or(MinuteOfDay::MIDNIGHT),
            morning_off_sunrise_offset: 30,
            evening_on_sunset_offset: -30,
            evening_off: MinuteOfDay::from_hm(23, 0).unwrap_or(MinuteOfDay::MIDNIGHT),
            first_slot: 1,
        }
    }
}

impl SchedulePlan {
    /// Check that every slot id fits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SlotOutOfRange`] when `first_slot` is too
    /// close to `u32::MAX` to number the five entries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let last_offset = u32::try_from(ScheduleTrigger::ALL.len() - 1).unwrap_or(u32::MAX);
        match self.first_slot.checked_add(last_offset) {
            Some(_) => Ok(()),
            None => Err(ValidationError::SlotOutOfRange(self.first_slot)),
        }
    }

    /// Expand into the five entries, in installation order.
    ///
    /// Slot ids saturate at `u32::MAX`; [`validate`](Self::validate) rejects
    /// plans where that would happen.
    #[must_use]
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        ScheduleTrigger::ALL
            .into_iter()
            .zip(0..)
            .map(|(trigger, offset)| {
                let slot = self.first_slot.saturating_add(offset);
                let (timespec, description) = match trigger {
                    ScheduleTrigger::MorningOn => (
                        TimeSpec::Daily { at: self.morning_on },
                        format!("morning on at {}", self.morning_on),
                    ),
                    ScheduleTrigger::CaptureSunrise => (
                        TimeSpec::Sunrise { offset_minutes: 0 },
                        "capture sunrise time".to_string(),
                    ),
                    ScheduleTrigger::MorningOff => (
                        TimeSpec::Sunrise {
                            offset_minutes: self.morning_off_sunrise_offset,
                        },
                        "morning off after sunrise".to_string(),
                    ),
                    ScheduleTrigger::EveningOn => (
                        TimeSpec::Sunset {
                            offset_minutes: self.evening_on_sunset_offset,
                        },
                        "evening on around sunset".to_string(),
                    ),
                    ScheduleTrigger::EveningOff => (
                        TimeSpec::Daily { at: self.evening_off },
                        format!("evening off at {}", self.evening_off),
                    ),
                };
                ScheduleEntry {
                    slot,
                    timespec,
                    trigger,
                    description,
                }
            })
            .collect()
    }
}

//! Schedule — the calendar/astronomical window of an outdoor light.
//!
//! A day has five trigger points (see [`ScheduleTrigger`]). The entries are
//! owned by the controller's own scheduler; lumina only writes them at
//! startup (see [`SchedulePlan`]) and reacts when they fire.

mod plan;
mod timespec;
mod trigger;

pub use plan::{ScheduleEntry, SchedulePlan};
pub use timespec::TimeSpec;
pub use trigger::ScheduleTrigger;

use crate::time::MinuteOfDay;

/// Decide whether the fixed-time morning trigger should switch the light on.
///
/// The light is worth turning on only while it is still darker than
/// `sunrise + grace`. When no sunrise has been captured yet (first boot)
/// this fails open.
#[must_use]
pub fn should_turn_on_morning_light(
    now: MinuteOfDay,
    sunrise: Option<MinuteOfDay>,
    grace_minutes: u16,
) -> bool {
    match sunrise {
        None => true,
        Some(sunrise) => now.get() < sunrise.get().saturating_add(grace_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u16, minute: u16) -> MinuteOfDay {
        MinuteOfDay::from_hm(hour, minute).unwrap()
    }

    #[test]
    fn should_turn_on_before_sunrise_grace() {
        assert!(should_turn_on_morning_light(at(6, 0), Some(at(6, 30)), 30));
    }

    #[test]
    fn should_skip_after_sunrise_grace() {
        assert!(!should_turn_on_morning_light(at(7, 10), Some(at(6, 30)), 30));
    }

    #[test]
    fn should_skip_exactly_at_sunrise_grace() {
        assert!(!should_turn_on_morning_light(at(7, 0), Some(at(6, 30)), 30));
    }

    #[test]
    fn should_fail_open_when_sunrise_unknown() {
        assert!(should_turn_on_morning_light(at(6, 0), None, 30));
    }

    #[test]
    fn should_not_overflow_for_late_sunrise() {
        assert!(should_turn_on_morning_light(at(23, 59), Some(at(23, 50)), 30));
    }
}

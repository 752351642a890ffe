//! Time spec — when a schedule entry fires.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::MinuteOfDay;

/// Either a fixed daily wall-clock time or an offset from sunrise/sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeSpec {
    /// Every day at a fixed local time.
    Daily { at: MinuteOfDay },
    /// Relative to local sunrise, in minutes (negative = before).
    Sunrise { offset_minutes: i16 },
    /// Relative to local sunset, in minutes (negative = before).
    Sunset { offset_minutes: i16 },
}

/// Renders the controller's timespec syntax: six-field cron
/// (`"0 0 6 * * *"`) or `@sunrise` / `@sunset` with an optional `±Nm`.
impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { at } => write!(f, "0 {} {} * * *", at.minute(), at.hour()),
            Self::Sunrise { offset_minutes } => write_astronomical(f, "@sunrise", *offset_minutes),
            Self::Sunset { offset_minutes } => write_astronomical(f, "@sunset", *offset_minutes),
        }
    }
}

fn write_astronomical(f: &mut fmt::Formatter<'_>, anchor: &str, offset: i16) -> fmt::Result {
    match offset {
        0 => f.write_str(anchor),
        o if o > 0 => write!(f, "{anchor}+{o}m"),
        o => write!(f, "{anchor}-{}m", o.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_daily_as_six_field_cron() {
        let spec = TimeSpec::Daily {
            at: MinuteOfDay::from_hm(23, 0).unwrap(),
        };
        assert_eq!(spec.to_string(), "0 0 23 * * *");

        let spec = TimeSpec::Daily {
            at: MinuteOfDay::from_hm(6, 15).unwrap(),
        };
        assert_eq!(spec.to_string(), "0 15 6 * * *");
    }

    #[test]
    fn should_render_astronomical_offsets() {
        assert_eq!(TimeSpec::Sunrise { offset_minutes: 0 }.to_string(), "@sunrise");
        assert_eq!(TimeSpec::Sunrise { offset_minutes: 30 }.to_string(), "@sunrise+30m");
        assert_eq!(TimeSpec::Sunset { offset_minutes: -30 }.to_string(), "@sunset-30m");
    }
}

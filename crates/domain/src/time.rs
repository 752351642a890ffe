//! Time and timestamp helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TimeError, ValidationError};

/// UTC timestamp used for suppression deadlines and status snapshots.
pub type Timestamp = DateTime<Utc>;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Compute `from + after`, failing instead of panicking on overflow.
///
/// # Errors
///
/// Returns [`TimeError`] when `after` does not fit a calendar delta or the
/// sum leaves the representable range.
pub fn deadline_after(from: Timestamp, after: std::time::Duration) -> Result<Timestamp, TimeError> {
    let delta = TimeDelta::from_std(after).map_err(|_| TimeError::DurationOutOfRange(after))?;
    from.checked_add_signed(delta).ok_or(TimeError::Overflow)
}

/// Local wall-clock time truncated to the minute, `0..1440`.
///
/// Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// 00:00.
    pub const MIDNIGHT: Self = Self(0);

    /// Wrap a raw minute count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MinuteOutOfRange`] for values `>= 1440`.
    pub fn new(minutes: u16) -> Result<Self, ValidationError> {
        if minutes < MINUTES_PER_DAY {
            Ok(Self(minutes))
        } else {
            Err(ValidationError::MinuteOutOfRange(minutes))
        }
    }

    /// Build from an hour and minute pair.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the pair is not a valid wall-clock time.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, ValidationError> {
        if hour >= 24 || minute >= 60 {
            return Err(ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Self::new(hour * 60 + minute)
    }

    /// Minute-of-day of any chrono time value, in that value's own offset.
    #[must_use]
    pub fn of<T: Timelike>(time: &T) -> Self {
        // hour() < 24 and minute() < 60 hold for every chrono time value
        let minutes = time.hour() * 60 + time.minute();
        Self(u16::try_from(minutes).unwrap_or(MINUTES_PER_DAY - 1))
    }

    /// Raw minute count.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    #[must_use]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Whether `self` falls inside `[after, ..midnight.., before]`.
    ///
    /// When `after > before` the window wraps midnight. Both bounds are
    /// inclusive.
    #[must_use]
    pub fn is_within(self, after: Self, before: Self) -> bool {
        if after <= before {
            self >= after && self <= before
        } else {
            self >= after || self <= before
        }
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MinuteOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MinuteOfDay> for String {
    fn from(value: MinuteOfDay) -> Self {
        value.to_string()
    }
}

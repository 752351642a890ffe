//! Clock port — the only way decision cores read the time.

use chrono::Local;
use lumina_domain::time::{self, MinuteOfDay, Timestamp};

/// Wall-clock source.
pub trait Clock {
    /// Current instant, used for suppression deadlines.
    fn now(&self) -> Timestamp;

    /// Current local wall-clock minute, used by the schedule window.
    fn minute_of_day(&self) -> MinuteOfDay;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn minute_of_day(&self) -> MinuteOfDay {
        (**self).minute_of_day()
    }
}

/// The host clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }

    fn minute_of_day(&self) -> MinuteOfDay {
        MinuteOfDay::of(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_minute_within_a_day() {
        let minute = SystemClock.minute_of_day();
        assert!(minute.get() < 24 * 60);
    }
}

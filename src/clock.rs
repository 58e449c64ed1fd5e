//! Source of the current local date and time
//!
//! New expenses are stamped and date filters are anchored through a `Clock`
//! so tests and the `--today` flag can pin "now".

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Provides the current local wall-clock instant
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Current local date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Pin the clock to an exact instant
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Pin the clock to a date, keeping the given time of day
    pub fn on(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let time = NaiveTime::from_hms_opt(13, 5, 0).unwrap();
        let clock = FixedClock::on(date, time);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().time(), time);
    }

    #[test]
    fn test_boxed_clock_delegates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::on(date, NaiveTime::MIN));
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_system_clock_is_local_today() {
        let today = Local::now().date_naive();
        let reported = SystemClock.today();
        // Allow for the test straddling midnight
        assert!(reported == today || reported == today.succ_opt().unwrap());
    }
}

//! Source of "now" in a fixed civil timezone.
//!
//! Every date bucket and every "today" is derived from a [`Clock`], never from
//! the host's local time settings.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Supplies the current instant in a fixed timezone.
pub trait Clock {
    /// The current civil date and time.
    fn now(&self) -> DateTime<Tz>;

    /// Today's civil date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The current civil time of day.
    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Reads the system clock and converts it to the configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// A clock pinned to one instant. Used in tests and for replaying input.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub const fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// Pins the clock to a civil date and time in `tz`.
    ///
    /// Returns `None` for local times skipped by a DST transition. For
    /// ambiguous times the earlier instant is used.
    pub fn at(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<Self> {
        tz.from_local_datetime(&date.and_time(time))
            .earliest()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Amsterdam;

    #[test]
    fn fixed_clock_reports_civil_date() {
        let clock = FixedClock::at(
            Amsterdam,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(0, 30, 0).unwrap(),
        )
        .unwrap();

        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(
            clock.time_of_day(),
            NaiveTime::from_hms_opt(0, 30, 0).unwrap()
        );
        // Same instant is still May 31 in UTC.
        assert_eq!(
            clock.now().with_timezone(&Utc).date_naive(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
    }

    #[test]
    fn fixed_clock_rejects_skipped_local_time() {
        // Clocks jump from 02:00 to 03:00 on the last Sunday of March.
        let gap = FixedClock::at(
            Amsterdam,
            NaiveDate::from_ymd_opt(2025, 3, 30).unwrap(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
        );
        assert!(gap.is_none());
    }

    #[test]
    fn system_clock_uses_configured_zone() {
        let clock = SystemClock::new(chrono_tz::Asia::Tokyo);
        assert_eq!(clock.now().timezone(), chrono_tz::Asia::Tokyo);
    }
}

//! Human-relative rendering of a time of day ("2h30m ago").

use chrono::{Duration, NaiveTime};

use crate::types::TimeOfDay;

/// Returned when the input cannot be parsed. Summaries never fail on formatting.
pub const TIME_UNKNOWN: &str = "time unknown";

/// Renders how long ago `time_of_day` (`HH:MM` or `HH:MM:SS`) was, relative to `now`.
///
/// Both are taken as clock times on the same day; a time later than `now` is
/// assumed to be from the previous day. Seconds are truncated to whole minutes.
pub fn relative_to_now(time_of_day: &str, now: NaiveTime) -> String {
    match TimeOfDay::parse(time_of_day) {
        Ok(then) => format_ago(minutes_since(then.time(), now)),
        Err(_) => TIME_UNKNOWN.to_string(),
    }
}

/// Whole minutes from `then` to `now`, rolling `then` back a day if needed.
pub fn minutes_since(then: NaiveTime, now: NaiveTime) -> i64 {
    let mut elapsed = now.signed_duration_since(then);
    if elapsed < Duration::zero() {
        elapsed = elapsed + Duration::days(1);
    }
    elapsed.num_minutes()
}

/// Formats a minute count as `"{h}h{m}m ago"`, `"{h}h ago"` or `"{m}m ago"`.
pub fn format_ago(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        format!("{mins}m ago")
    } else if mins == 0 {
        format!("{hours}h ago")
    } else {
        format!("{hours}h{mins}m ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn same_day_hours_and_minutes() {
        assert_eq!(relative_to_now("09:00", t(11, 30)), "2h30m ago");
    }

    #[test]
    fn crosses_midnight() {
        assert_eq!(relative_to_now("23:50", t(0, 10)), "20m ago");
        assert_eq!(relative_to_now("22:10:00", t(1, 10)), "3h ago");
    }

    #[test]
    fn whole_hours_and_minutes_only() {
        assert_eq!(relative_to_now("08:30", t(11, 30)), "3h ago");
        assert_eq!(relative_to_now("11:05", t(11, 30)), "25m ago");
        assert_eq!(relative_to_now("11:30", t(11, 30)), "0m ago");
    }

    #[test]
    fn seconds_are_truncated() {
        let now = NaiveTime::from_hms_opt(10, 0, 30).unwrap();
        assert_eq!(relative_to_now("09:58:45", now), "1m ago");
    }

    #[test]
    fn parse_failure_yields_sentinel() {
        assert_eq!(relative_to_now("noon", t(12, 0)), TIME_UNKNOWN);
        assert_eq!(relative_to_now("25:00", t(12, 0)), TIME_UNKNOWN);
        assert_eq!(relative_to_now("", t(12, 0)), TIME_UNKNOWN);
    }
}

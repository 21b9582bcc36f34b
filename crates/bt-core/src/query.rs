//! Per-date queries over an [`EventLog`].
//!
//! A date with no bucket behaves exactly like a bucket with no matching
//! events: every query returns zero or empty, never an error.

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::{Event, EventKind, EventLog};
use crate::event_type::{DiaperType, EventType};

/// Diaper changes for one date, by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiaperCounts {
    pub pooped: u32,
    pub peed: u32,
    pub both: u32,
}

impl DiaperCounts {
    /// Total of the three canonical types.
    pub const fn total(&self) -> u32 {
        self.pooped + self.peed + self.both
    }
}

impl std::ops::AddAssign for DiaperCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.pooped += rhs.pooped;
        self.peed += rhs.peed;
        self.both += rhs.both;
    }
}

/// Everything the daily views need about one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub feedings: u32,
    pub total_ml: u64,
    /// Mean of the day's readings, `None` if nothing was measured.
    pub avg_temperature: Option<f64>,
    /// Sum and count of the day's readings, for averaging across days.
    pub temperature_sum: f64,
    pub temperature_readings: u32,
    pub diapers: DiaperCounts,
}

fn bucket(log: &EventLog, date: NaiveDate) -> &[Event] {
    log.get(&date).map_or(&[][..], Vec::as_slice)
}

/// Today's events, earliest first.
pub fn today_events(log: &EventLog, today: NaiveDate) -> Vec<Event> {
    let mut events = bucket(log, today).to_vec();
    events.sort_by(|a, b| a.time.cmp(&b.time));
    events
}

/// Total ml fed on `date`.
///
/// Amounts read from disk are not range-checked, so the sum is widened.
pub fn total_ml_for_date(log: &EventLog, date: NaiveDate) -> u64 {
    bucket(log, date)
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Feeding { amount_ml } => Some(u64::from(amount_ml)),
            _ => None,
        })
        .sum()
}

/// Temperature readings on `date`, in bucket order.
pub fn temperatures_for_date(log: &EventLog, date: NaiveDate) -> Vec<f64> {
    bucket(log, date)
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Temperature { celsius } => Some(celsius),
            _ => None,
        })
        .collect()
}

/// Diaper tally for `date`. Unrecognized diaper types are not counted.
pub fn diaper_counts_for_date(log: &EventLog, date: NaiveDate) -> DiaperCounts {
    let mut counts = DiaperCounts::default();
    for event in bucket(log, date) {
        if let EventKind::Diaper { diaper_type } = &event.kind {
            match diaper_type {
                DiaperType::Pooped => counts.pooped += 1,
                DiaperType::Peed => counts.peed += 1,
                DiaperType::Both => counts.both += 1,
                DiaperType::Other(_) => {}
            }
        }
    }
    counts
}

/// Arithmetic mean, `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Summarizes a single date.
pub fn day_summary(log: &EventLog, date: NaiveDate) -> DaySummary {
    let feedings = bucket(log, date)
        .iter()
        .filter(|e| e.is(EventType::Feeding))
        .count();
    let temperatures = temperatures_for_date(log, date);
    DaySummary {
        date,
        feedings: u32::try_from(feedings).unwrap_or(u32::MAX),
        total_ml: total_ml_for_date(log, date),
        avg_temperature: mean(&temperatures),
        temperature_sum: temperatures.iter().sum(),
        temperature_readings: u32::try_from(temperatures.len()).unwrap_or(u32::MAX),
        diapers: diaper_counts_for_date(log, date),
    }
}

/// The chronologically last event of `event_type` today.
pub fn last_event_of(log: &EventLog, today: NaiveDate, event_type: EventType) -> Option<Event> {
    bucket(log, today)
        .iter()
        .filter(|e| e.is(event_type))
        .max_by(|a, b| a.time.cmp(&b.time))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_log() -> EventLog {
        serde_json::from_str(
            r#"{
                "2025-01-10": [
                    {"time": "14:00:00", "type": "feeding", "amount_ml": 120, "user": "A"},
                    {"time": "09:30", "type": "drink", "amount_ml": 90, "user": "M"},
                    {"time": "10:00", "type": "temperature", "temperature_celsius": 37.0, "user": "A"},
                    {"time": "08:00", "type": "temperature", "temperature_celsius": 36.0, "user": "A"},
                    {"time": "11:00", "type": "diaper", "diaper_type": "pooped", "user": "A"},
                    {"time": "12:00", "type": "diaper", "diaper_type": "peed", "user": "M"},
                    {"time": "12:30", "type": "diaper", "diaper_type": "peed", "user": "M"},
                    {"time": "13:00", "type": "diaper", "diaper_type": "urine", "user": "M"},
                    {"time": "13:30", "type": "diaper", "diaper_type": "dry", "user": "M"},
                    {"time": "13:45", "type": "nap", "user": "M", "minutes": 30}
                ],
                "2025-01-11": []
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn total_ml_sums_only_feedings() {
        let log = sample_log();
        assert_eq!(total_ml_for_date(&log, date("2025-01-10")), 210);
        assert_eq!(total_ml_for_date(&log, date("2025-01-11")), 0);
        assert_eq!(total_ml_for_date(&log, date("2024-12-25")), 0);
    }

    #[test]
    fn total_ml_does_not_overflow_on_huge_stored_amounts() {
        let log: EventLog = serde_json::from_str(
            r#"{"2025-01-10": [
                {"time": "08:00", "type": "feeding", "amount_ml": 4294967295, "user": "A"},
                {"time": "09:00", "type": "feeding", "amount_ml": 4294967295, "user": "A"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            total_ml_for_date(&log, date("2025-01-10")),
            2 * u64::from(u32::MAX)
        );
    }

    #[test]
    fn today_events_sorted_by_time() {
        let log = sample_log();
        let events = today_events(&log, date("2025-01-10"));
        let times: Vec<String> = events.iter().map(|e| e.time.to_string()).collect();
        assert_eq!(
            times,
            [
                "08:00", "09:30", "10:00", "11:00", "12:00", "12:30", "13:00", "13:30", "13:45",
                "14:00:00"
            ]
        );
        assert!(today_events(&log, date("2025-01-12")).is_empty());
    }

    #[test]
    fn temperatures_keep_bucket_order() {
        let log = sample_log();
        assert_eq!(temperatures_for_date(&log, date("2025-01-10")), [37.0, 36.0]);
        assert!(temperatures_for_date(&log, date("2025-01-11")).is_empty());
    }

    #[test]
    fn diaper_tally_normalizes_urine_and_drops_unknown() {
        let log = sample_log();
        assert_eq!(
            diaper_counts_for_date(&log, date("2025-01-10")),
            DiaperCounts {
                pooped: 1,
                peed: 3,
                both: 0
            }
        );
        assert_eq!(
            diaper_counts_for_date(&log, date("2030-01-01")),
            DiaperCounts::default()
        );
    }

    #[test]
    fn day_summary_of_empty_date_has_no_temperature() {
        let log = sample_log();
        let summary = day_summary(&log, date("2025-01-11"));
        assert_eq!(summary.feedings, 0);
        assert_eq!(summary.total_ml, 0);
        assert_eq!(summary.avg_temperature, None);
        assert_eq!(summary.diapers.total(), 0);
    }

    #[test]
    fn day_summary_averages_temperature() {
        let log = sample_log();
        let summary = day_summary(&log, date("2025-01-10"));
        assert_eq!(summary.feedings, 2);
        assert_eq!(summary.avg_temperature, Some(36.5));
        assert_eq!(summary.temperature_readings, 2);
        assert!((summary.temperature_sum - 73.0).abs() < f64::EPSILON);
        assert_eq!(summary.diapers.total(), 4);
    }

    #[test]
    fn last_event_of_picks_latest_time() {
        let log = sample_log();
        let last = last_event_of(&log, date("2025-01-10"), EventType::Feeding).unwrap();
        assert_eq!(last.time.to_string(), "14:00:00");
        assert!(last_event_of(&log, date("2025-01-11"), EventType::Diaper).is_none());
    }
}

//! Commands that record a new event: `feed`, `diaper` and `temp`.

use std::io::Write;

use anyhow::Result;

use bt_core::{Celsius, Clock, DiaperType, FeedingAmount, TimeOfDay, UserInitial};
use bt_store::Tracker;

/// Records a feeding of `amount` ml, now or at `at` earlier today.
pub fn feed<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &Tracker<C>,
    amount: &str,
    at: Option<&str>,
    user: UserInitial,
) -> Result<()> {
    let amount: FeedingAmount = amount.parse()?;
    let at = at.map(TimeOfDay::parse).transpose()?;
    let event = tracker.record_feeding(amount, at, user)?;

    writeln!(
        writer,
        "Recorded feeding: {amount} at {} [{}]",
        event.time, event.user
    )?;
    let total = tracker.total_ml_for_date(tracker.today());
    writeln!(writer, "Total today: {total}ml")?;
    Ok(())
}

/// Records a diaper change.
pub fn diaper<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &Tracker<C>,
    kind: &str,
    user: UserInitial,
) -> Result<()> {
    let diaper_type: DiaperType = kind.parse()?;
    let event = tracker.record_diaper(diaper_type.clone(), user)?;

    writeln!(
        writer,
        "Recorded diaper: {} at {} [{}]",
        diaper_type.label(),
        event.time,
        event.user
    )?;
    Ok(())
}

/// Records a temperature reading.
pub fn temp<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &Tracker<C>,
    value: &str,
    user: UserInitial,
) -> Result<()> {
    let celsius: Celsius = value.parse()?;
    let event = tracker.record_temperature(celsius, user)?;

    writeln!(
        writer,
        "Recorded temperature: {:.1}°C at {} [{}]",
        celsius.value(),
        event.time,
        event.user
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::commands::util::testing::tracker_at;

    use insta::assert_snapshot;

    #[test]
    fn test_feed_reports_running_total() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = tracker_at(&temp, "2025-06-01", "14:05:12");
        let user = UserInitial::from_name(Some("Anna"));

        let mut output = Vec::new();
        feed(&mut output, &tracker, "90", Some("08:30"), user).unwrap();
        feed(&mut output, &tracker, "120", None, user).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Recorded feeding: 90ml at 08:30 [A]
        Total today: 90ml
        Recorded feeding: 120ml at 14:05:12 [A]
        Total today: 210ml
        ");
    }

    #[test]
    fn test_feed_rejects_out_of_range_amount() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = tracker_at(&temp, "2025-06-01", "14:00:00");

        let mut output = Vec::new();
        let err = feed(&mut output, &tracker, "600", None, UserInitial::UNKNOWN).unwrap_err();

        assert!(err.to_string().contains("between 1 and 500"));
        assert!(output.is_empty());
        assert!(!tracker.store().path().exists());
    }

    #[test]
    fn test_feed_rejects_future_time() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = tracker_at(&temp, "2025-06-01", "14:00:00");

        let mut output = Vec::new();
        let result = feed(&mut output, &tracker, "60", Some("15:00"), UserInitial::UNKNOWN);

        assert!(result.is_err());
        assert!(tracker.today_events().is_empty());
    }

    #[test]
    fn test_diaper_and_temp() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = tracker_at(&temp, "2025-06-01", "07:45:00");

        let mut output = Vec::new();
        diaper(&mut output, &tracker, "both", UserInitial::UNKNOWN).unwrap();
        super::temp(&mut output, &tracker, "36,8", UserInitial::UNKNOWN).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Recorded diaper: pooped + peed at 07:45:00 [?]
        Recorded temperature: 36.8°C at 07:45:00 [?]
        ");
        assert_eq!(tracker.temperatures_for_date(tracker.today()), [36.8]);
    }

    #[test]
    fn test_unknown_diaper_type_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = tracker_at(&temp, "2025-06-01", "07:45:00");

        let mut output = Vec::new();
        assert!(diaper(&mut output, &tracker, "wet", UserInitial::UNKNOWN).is_err());
        assert!(tracker.today_events().is_empty());
    }
}

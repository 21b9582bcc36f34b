//! Chart command: build a series over a range and hand it to a sink.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use bt_core::{ChartSink, Clock, Series, SeriesRange};
use bt_store::Tracker;

use crate::render::{JsonChart, TextChart};

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &Tracker<C>,
    range: SeriesRange,
    json: bool,
    out: Option<&Path>,
) -> Result<()> {
    let series = tracker.series(range);
    tracing::debug!(days = series.len(), ?range, "built series");

    let bytes = if json {
        render(&JsonChart, range.title(), &series)?
    } else {
        render(&TextChart, range.title(), &series)?
    };

    match out {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write chart to {}", path.display()))?;
            writeln!(writer, "Wrote chart to {}", path.display())?;
        }
        None => writer.write_all(&bytes)?,
    }
    Ok(())
}

fn render<S>(sink: &S, title: &str, series: &Series) -> Result<Vec<u8>>
where
    S: ChartSink,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    sink.render(title, series).context("failed to render chart")
}

#[cfg(test)]
mod tests {
    use super::*;

    use bt_core::{Celsius, Event, FeedingAmount, TimeOfDay, UserInitial};
    use chrono::NaiveDate;

    use crate::commands::util::testing::tracker_at;

    use insta::assert_snapshot;

    fn seeded(temp: &tempfile::TempDir) -> Tracker<bt_core::FixedClock> {
        let tracker = tracker_at(temp, "2025-06-07", "12:00:00");
        tracker
            .store()
            .append(
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
                Event::feeding(
                    TimeOfDay::parse("10:00").unwrap(),
                    FeedingAmount::new(50).unwrap(),
                    UserInitial::UNKNOWN,
                ),
            )
            .unwrap();
        tracker
            .record_feeding(FeedingAmount::new(100).unwrap(), None, UserInitial::UNKNOWN)
            .unwrap();
        tracker
            .record_temperature(Celsius::new(37.0).unwrap(), UserInitial::UNKNOWN)
            .unwrap();
        tracker
    }

    #[test]
    fn test_week_text_chart() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = seeded(&temp);

        let mut output = Vec::new();
        run(&mut output, &tracker, SeriesRange::Week, false, None).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Last 7 days

        2025-06-01  ░░░░░░░░░░    0ml       -  0/0/0
        2025-06-02  ░░░░░░░░░░    0ml       -  0/0/0
        2025-06-03  ░░░░░░░░░░    0ml       -  0/0/0
        2025-06-04  ░░░░░░░░░░    0ml       -  0/0/0
        2025-06-05  █████░░░░░   50ml       -  0/0/0
        2025-06-06  ░░░░░░░░░░    0ml       -  0/0/0
        2025-06-07  ██████████  100ml  37.0°C  0/0/0

        Total: 150ml over 7 days (21ml/day)
        Mean temperature: 37.0°C
        Diapers: 0 pooped, 0 peed, 0 both
        ");
    }

    #[test]
    fn test_all_time_json_chart_to_file() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = seeded(&temp);
        let out = temp.path().join("chart.json");

        let mut output = Vec::new();
        run(&mut output, &tracker, SeriesRange::AllTime, true, Some(&out)).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, format!("Wrote chart to {}\n", out.display()));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["title"], "All time");
        assert_eq!(value["dates"], serde_json::json!(["2025-06-05", "2025-06-07"]));
        assert_eq!(value["ml_totals"], serde_json::json!([50, 100]));
        assert_eq!(value["avg_temps"], serde_json::json!([null, 37.0]));
    }
}

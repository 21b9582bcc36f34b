//! Chart sinks: a terminal bar chart and a JSON document.

use std::fmt::Write as _;

use serde::Serialize;

use bt_core::{ChartSink, Series, SeriesTotals};

/// Renders the series as one bar per day, scaled to the busiest day.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextChart;

/// Renders the series and its totals as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonChart;

#[derive(Serialize)]
struct ChartDocument<'a> {
    title: &'a str,
    #[serde(flatten)]
    series: &'a Series,
    totals: SeriesTotals,
}

impl ChartSink for TextChart {
    type Error = std::fmt::Error;

    fn render(&self, title: &str, series: &Series) -> Result<Vec<u8>, Self::Error> {
        let mut out = String::new();
        writeln!(out, "{title}")?;
        writeln!(out)?;

        let days = series.days();
        let max = days.iter().map(|d| d.total_ml).max().unwrap_or(0);
        for day in days {
            writeln!(
                out,
                "{}  {} {:>4}ml  {:>6}  {}/{}/{}",
                day.date,
                progress_bar(day.total_ml, max),
                day.total_ml,
                format_temperature(day.avg_temperature),
                day.diapers.pooped,
                day.diapers.peed,
                day.diapers.both,
            )?;
        }
        if !days.is_empty() {
            writeln!(out)?;
        }

        let totals = series.totals();
        writeln!(
            out,
            "Total: {}ml over {} days ({:.0}ml/day)",
            totals.total_ml, totals.days, totals.mean_ml_per_day
        )?;
        writeln!(
            out,
            "Mean temperature: {}",
            format_temperature(totals.mean_temperature)
        )?;
        writeln!(
            out,
            "Diapers: {} pooped, {} peed, {} both",
            totals.diapers.pooped, totals.diapers.peed, totals.diapers.both
        )?;

        Ok(out.into_bytes())
    }
}

impl ChartSink for JsonChart {
    type Error = serde_json::Error;

    fn render(&self, title: &str, series: &Series) -> Result<Vec<u8>, Self::Error> {
        let document = ChartDocument {
            title,
            series,
            totals: series.totals(),
        };
        let mut bytes = serde_json::to_vec_pretty(&document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Formats an optional temperature, `-` when there was no reading.
pub fn format_temperature(celsius: Option<f64>) -> String {
    celsius.map_or_else(|| "-".to_string(), |t| format!("{t:.1}°C"))
}

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ratio is clamped to 0..=10 before the cast"
)]
pub fn progress_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

//! Fixed-length per-date series for charts.
//!
//! A [`Series`] zips the per-date queries across an ordered list of dates.
//! Rendering is left to a [`ChartSink`] supplied by the caller.

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

use crate::event::EventLog;
use crate::query::{DaySummary, DiaperCounts, day_summary};

/// Which dates a series covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRange {
    /// The last 7 days, including today.
    Week,
    /// The last 30 days, including today.
    Month,
    /// Every date in the log, plus today.
    AllTime,
}

impl SeriesRange {
    /// The dates covered, oldest first.
    pub fn dates(self, log: &EventLog, today: NaiveDate) -> Vec<NaiveDate> {
        match self {
            Self::Week => last_n_days(today, 7),
            Self::Month => last_n_days(today, 30),
            Self::AllTime => all_time_dates(log, today),
        }
    }

    /// Chart heading for this range.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::AllTime => "All time",
        }
    }
}

/// `n` consecutive dates ending with `today`, oldest first.
pub fn last_n_days(today: NaiveDate, n: u32) -> Vec<NaiveDate> {
    (0..i64::from(n))
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// Every date key in the log in chronological order, with `today` appended
/// unless it is already the final entry.
pub fn all_time_dates(log: &EventLog, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = log.keys().copied().collect();
    if dates.last() != Some(&today) {
        dates.push(today);
    }
    dates
}

/// Per-date values in date order.
///
/// Built from [`DaySummary`] rows, so every column has one entry per date.
/// Serializes as parallel arrays: `dates`, `ml_totals`, `avg_temps` (`null`
/// on days without a reading), `pooped`, `peed` and `both`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    days: Vec<DaySummary>,
}

/// Aggregates over a whole series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTotals {
    pub days: usize,
    pub total_ml: u64,
    pub mean_ml_per_day: f64,
    /// Mean over every reading in the range, `None` if there were none.
    pub mean_temperature: Option<f64>,
    pub diapers: DiaperCounts,
}

impl Series {
    /// Number of dates in the series.
    pub const fn len(&self) -> usize {
        self.days.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// One summary per date, in series order.
    pub fn days(&self) -> &[DaySummary] {
        &self.days
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    pub fn ml_totals(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.total_ml).collect()
    }

    /// Daily mean temperature; `None` on days without a reading so the
    /// renderer can skip the point instead of drawing a false zero.
    pub fn avg_temps(&self) -> Vec<Option<f64>> {
        self.days.iter().map(|d| d.avg_temperature).collect()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn totals(&self) -> SeriesTotals {
        let mut total_ml = 0_u64;
        let mut temperature_sum = 0.0;
        let mut readings = 0_u64;
        let mut diapers = DiaperCounts::default();
        for day in &self.days {
            total_ml += day.total_ml;
            temperature_sum += day.temperature_sum;
            readings += u64::from(day.temperature_readings);
            diapers += day.diapers;
        }
        let mean_ml_per_day = if self.is_empty() {
            0.0
        } else {
            total_ml as f64 / self.len() as f64
        };
        SeriesTotals {
            days: self.len(),
            total_ml,
            mean_ml_per_day,
            mean_temperature: (readings > 0).then(|| temperature_sum / readings as f64),
            diapers,
        }
    }
}

impl Serialize for Series {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let column = |f: fn(&DaySummary) -> u32| self.days.iter().map(f).collect::<Vec<_>>();
        let mut state = serializer.serialize_struct("Series", 6)?;
        state.serialize_field("dates", &self.dates())?;
        state.serialize_field("ml_totals", &self.ml_totals())?;
        state.serialize_field("avg_temps", &self.avg_temps())?;
        state.serialize_field("pooped", &column(|d| d.diapers.pooped))?;
        state.serialize_field("peed", &column(|d| d.diapers.peed))?;
        state.serialize_field("both", &column(|d| d.diapers.both))?;
        state.end()
    }
}

impl FromIterator<DaySummary> for Series {
    fn from_iter<I: IntoIterator<Item = DaySummary>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Builds the series for `dates`, preserving their order.
///
/// Each date is summarized independently, so the work is spread across the
/// rayon pool; `collect` keeps the input order.
pub fn series(log: &EventLog, dates: &[NaiveDate]) -> Series {
    let days: Vec<DaySummary> = dates.par_iter().map(|&d| day_summary(log, d)).collect();
    Series { days }
}

/// Turns a series into a displayable payload.
///
/// The payload format (image bytes, text, JSON) is owned by the sink.
pub trait ChartSink {
    type Error;

    fn render(&self, title: &str, series: &Series) -> Result<Vec<u8>, Self::Error>;
}

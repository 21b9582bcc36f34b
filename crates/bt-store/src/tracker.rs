//! The store bound to a clock: the operations the front end calls.

use bt_core::query;
use bt_core::{
    Celsius, Clock, DaySummary, DiaperCounts, DiaperType, Event, EventType, FeedingAmount, Series,
    SeriesRange, TimeOfDay, UserInitial, ValidationError, relative_to_now, series,
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::{DeleteOutcome, EventStore, StoreError};

/// Errors from recording an event.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The input was rejected before touching the store.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Records and queries care events for "today" as defined by a [`Clock`].
///
/// Every query re-reads the store.
#[derive(Debug)]
pub struct Tracker<C> {
    store: EventStore,
    clock: C,
}

impl<C: Clock> Tracker<C> {
    pub const fn new(store: EventStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub const fn store(&self) -> &EventStore {
        &self.store
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Today's civil date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Date bucket and time of day, both taken from one reading of the clock.
    fn now(&self) -> (NaiveDate, TimeOfDay) {
        let now = self.clock.now();
        (now.date_naive(), TimeOfDay::from_time(now.time()))
    }

    fn record(&self, date: NaiveDate, event: Event) -> Result<Event, StoreError> {
        self.store.append(date, event.clone())?;
        tracing::info!(%date, time = %event.time, kind = ?event.kind, "recorded event");
        Ok(event)
    }

    /// Records a feeding now, or at an earlier time today.
    pub fn record_feeding(
        &self,
        amount: FeedingAmount,
        at: Option<TimeOfDay>,
        user: UserInitial,
    ) -> Result<Event, TrackerError> {
        let (today, now) = self.now();
        let time = match at {
            Some(time) if time.time() > now.time() => {
                return Err(ValidationError::TimeInFuture { time, now }.into());
            }
            Some(time) => time,
            None => now,
        };
        Ok(self.record(today, Event::feeding(time, amount, user))?)
    }

    /// Records a diaper change now.
    pub fn record_diaper(
        &self,
        diaper_type: DiaperType,
        user: UserInitial,
    ) -> Result<Event, TrackerError> {
        let (today, now) = self.now();
        Ok(self.record(today, Event::diaper(now, diaper_type, user))?)
    }

    /// Records a temperature reading now.
    pub fn record_temperature(
        &self,
        celsius: Celsius,
        user: UserInitial,
    ) -> Result<Event, TrackerError> {
        let (today, now) = self.now();
        Ok(self.record(today, Event::temperature(now, celsius, user))?)
    }

    /// Deletes today's chronologically last event of `event_type`.
    pub fn undo_last(&self, event_type: EventType) -> Result<DeleteOutcome, StoreError> {
        let outcome = self.store.delete_last(self.today(), event_type)?;
        if let DeleteOutcome::Removed(event) = &outcome {
            tracing::info!(time = %event.time, kind = ?event.kind, "deleted event");
        }
        Ok(outcome)
    }

    /// Today's events, earliest first.
    pub fn today_events(&self) -> Vec<Event> {
        query::today_events(&self.store.load(), self.today())
    }

    pub fn total_ml_for_date(&self, date: NaiveDate) -> u64 {
        query::total_ml_for_date(&self.store.load(), date)
    }

    pub fn temperatures_for_date(&self, date: NaiveDate) -> Vec<f64> {
        query::temperatures_for_date(&self.store.load(), date)
    }

    pub fn diaper_counts_for_date(&self, date: NaiveDate) -> DiaperCounts {
        query::diaper_counts_for_date(&self.store.load(), date)
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        query::day_summary(&self.store.load(), date)
    }

    /// Today's latest event of `event_type`, if any.
    pub fn last_event_of(&self, event_type: EventType) -> Option<Event> {
        query::last_event_of(&self.store.load(), self.today(), event_type)
    }

    /// Series over an arbitrary list of dates, in the given order.
    pub fn series_for(&self, dates: &[NaiveDate]) -> Series {
        series::series(&self.store.load(), dates)
    }

    /// Series for one of the standard ranges, ending today.
    pub fn series(&self, range: SeriesRange) -> Series {
        let log = self.store.load();
        let dates = range.dates(&log, self.today());
        series::series(&log, &dates)
    }

    /// How long ago `time_of_day` was, e.g. `"2h30m ago"`.
    pub fn relative_to_now(&self, time_of_day: &str) -> String {
        relative_to_now(time_of_day, self.clock.time_of_day())
    }
}

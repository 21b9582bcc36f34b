//! Core domain logic for the baby tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: feedings, diaper changes and temperature readings, and the
//!   day-keyed log that stores them
//! - Queries: per-date totals, tallies and daily summaries
//! - Series: fixed-length per-date series for charts
//! - Relative time: "2h30m ago" rendering of a time of day
//!
//! Nothing here performs I/O. "Now" comes from a [`Clock`].

pub mod clock;
mod event;
pub mod event_type;
pub mod query;
pub mod relative;
pub mod series;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event::{Event, EventKind, EventLog};
pub use event_type::{DiaperType, EventType};
pub use query::{DaySummary, DiaperCounts};
pub use relative::{TIME_UNKNOWN, relative_to_now};
pub use series::{ChartSink, Series, SeriesRange, SeriesTotals};
pub use types::{Celsius, FeedingAmount, TimeOfDay, UserInitial, ValidationError};

//! Core type definitions with validation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest feeding amount accepted from input, in ml.
pub const MIN_FEEDING_ML: u32 = 1;
/// Largest feeding amount accepted from input, in ml.
pub const MAX_FEEDING_ML: u32 = 500;
/// Lowest body temperature accepted from input.
pub const MIN_CELSIUS: f64 = 30.0;
/// Highest body temperature accepted from input.
pub const MAX_CELSIUS: f64 = 45.0;

/// Validation errors for user input.
///
/// Every variant renders as a message that can be shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The feeding amount was outside the accepted range.
    #[error("feeding amount must be between 1 and 500 ml, got {value}")]
    AmountOutOfRange { value: i64 },

    /// The feeding amount was not a whole number.
    #[error("feeding amount must be a whole number of ml, got '{input}'")]
    AmountNotANumber { input: String },

    /// The temperature was outside the accepted range.
    #[error("temperature must be between 30.0 and 45.0 °C, got {value}")]
    TemperatureOutOfRange { value: f64 },

    /// The temperature was not a number.
    #[error("temperature must be a number (e.g. 36.5 or 36,5), got '{input}'")]
    TemperatureNotANumber { input: String },

    /// The time of day was not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day '{input}', expected HH:MM or HH:MM:SS")]
    InvalidTimeOfDay { input: String },

    /// A backdated time lies after the current time.
    #[error("time {time} is later than the current time {now}")]
    TimeInFuture { time: TimeOfDay, now: TimeOfDay },

    /// Unknown event type name.
    #[error("unknown event type '{value}', expected feeding, diaper or temperature")]
    UnknownEventType { value: String },

    /// Unknown diaper type name.
    #[error("unknown diaper type '{value}', expected pooped, peed or both")]
    UnknownDiaperType { value: String },
}

/// A validated bottle feeding amount in millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedingAmount(u32);

impl FeedingAmount {
    /// Creates a new amount after range validation.
    pub fn new(ml: i64) -> Result<Self, ValidationError> {
        match u32::try_from(ml) {
            Ok(value) if (MIN_FEEDING_ML..=MAX_FEEDING_ML).contains(&value) => Ok(Self(value)),
            _ => Err(ValidationError::AmountOutOfRange { value: ml }),
        }
    }

    /// Returns the amount in ml.
    pub const fn ml(self) -> u32 {
        self.0
    }
}

impl FromStr for FeedingAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let ml: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::AmountNotANumber {
                input: trimmed.to_string(),
            })?;
        Self::new(ml)
    }
}

impl fmt::Display for FeedingAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ml", self.0)
    }
}

/// A validated body temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Celsius(f64);

impl Celsius {
    /// Creates a new temperature after range validation.
    ///
    /// NaN and infinities are rejected along with out-of-range values.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(MIN_CELSIUS..=MAX_CELSIUS).contains(&value) {
            return Err(ValidationError::TemperatureOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Celsius {
    type Err = ValidationError;

    /// Accepts both `.` and `,` as the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed.replace(',', ".").parse().map_err(|_| {
            ValidationError::TemperatureNotANumber {
                input: trimmed.to_string(),
            }
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

/// The single-character tag recorded with every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserInitial(char);

impl UserInitial {
    /// Used when the recording user has no known name.
    pub const UNKNOWN: Self = Self('?');

    /// Derives the initial from a display name.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.trim().chars().next())
            .and_then(|c| c.to_uppercase().next())
            .map_or(Self::UNKNOWN, Self)
    }

    /// Returns the initial as an owned string, the form stored in the log.
    pub fn to_tag(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for UserInitial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wall-clock time of day, `HH:MM` or `HH:MM:SS`.
///
/// The textual precision is remembered so that rewriting a stored log does
/// not change `09:00` into `09:00:00`. Ordering and equality compare the
/// parsed time first, then the precision, so sorting is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    time: NaiveTime,
    with_seconds: bool,
}

impl TimeOfDay {
    /// Wraps a clock time, keeping whole seconds.
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            time: time.with_nanosecond(0).unwrap_or(time),
            with_seconds: true,
        }
    }

    /// Parses `HH:MM` or `HH:MM:SS`. Fields must be zero-padded.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTimeOfDay {
            input: input.to_string(),
        };
        let (format, with_seconds) = match input.len() {
            5 => ("%H:%M", false),
            8 => ("%H:%M:%S", true),
            _ => return Err(invalid()),
        };
        if !input.bytes().enumerate().all(|(i, b)| {
            if i % 3 == 2 {
                b == b':'
            } else {
                b.is_ascii_digit()
            }
        }) {
            return Err(invalid());
        }
        let time = NaiveTime::parse_from_str(input, format).map_err(|_| invalid())?;
        Ok(Self { time, with_seconds })
    }

    /// Returns the parsed clock time.
    pub const fn time(self) -> NaiveTime {
        self.time
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then(self.with_seconds.cmp(&other.with_seconds))
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.with_seconds {
            write!(f, "{}", self.time.format("%H:%M:%S"))
        } else {
            write!(f, "{}", self.time.format("%H:%M"))
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeding_amount_validates_range() {
        assert!(FeedingAmount::new(1).is_ok());
        assert!(FeedingAmount::new(500).is_ok());
        assert!(FeedingAmount::new(0).is_err());
        assert!(FeedingAmount::new(501).is_err());
        assert!(FeedingAmount::new(-20).is_err());
    }

    #[test]
    fn feeding_amount_rejects_600() {
        let err = "600".parse::<FeedingAmount>().unwrap_err();
        assert_eq!(err, ValidationError::AmountOutOfRange { value: 600 });
        assert_eq!(
            err.to_string(),
            "feeding amount must be between 1 and 500 ml, got 600"
        );
    }

    #[test]
    fn feeding_amount_rejects_non_integer_text() {
        assert!(matches!(
            "12.5".parse::<FeedingAmount>(),
            Err(ValidationError::AmountNotANumber { .. })
        ));
        assert!(matches!(
            "lots".parse::<FeedingAmount>(),
            Err(ValidationError::AmountNotANumber { .. })
        ));
        assert_eq!(" 120 ".parse::<FeedingAmount>().unwrap().ml(), 120);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for parsed literals"
    )]
    fn celsius_accepts_comma_separator() {
        assert_eq!("36,5".parse::<Celsius>().unwrap().value(), 36.5);
        assert_eq!("37.2".parse::<Celsius>().unwrap().value(), 37.2);
    }

    #[test]
    fn celsius_validates_range() {
        assert!(Celsius::new(30.0).is_ok());
        assert!(Celsius::new(45.0).is_ok());
        assert!(Celsius::new(29.9).is_err());
        assert!(Celsius::new(45.1).is_err());
        assert!(Celsius::new(f64::NAN).is_err());
        assert!(matches!(
            "warm".parse::<Celsius>(),
            Err(ValidationError::TemperatureNotANumber { .. })
        ));
    }

    #[test]
    fn user_initial_from_name() {
        assert_eq!(UserInitial::from_name(Some("anna")).to_tag(), "A");
        assert_eq!(UserInitial::from_name(Some("  bob")).to_tag(), "B");
        assert_eq!(UserInitial::from_name(Some("")), UserInitial::UNKNOWN);
        assert_eq!(UserInitial::from_name(None).to_tag(), "?");
    }

    #[test]
    fn time_of_day_keeps_precision() {
        assert_eq!(TimeOfDay::parse("09:00").unwrap().to_string(), "09:00");
        assert_eq!(TimeOfDay::parse("23:59:07").unwrap().to_string(), "23:59:07");
    }

    #[test]
    fn time_of_day_rejects_malformed() {
        for input in ["9:00", "24:00", "12:60", "12-30", "12:30:", "", "ab:cd", "12:30:61x"] {
            assert!(TimeOfDay::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn time_of_day_orders_chronologically() {
        let mut times: Vec<TimeOfDay> = ["14:00", "09:30:15", "09:30", "23:59:59"]
            .iter()
            .map(|s| TimeOfDay::parse(s).unwrap())
            .collect();
        times.sort();
        let rendered: Vec<String> = times.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["09:30", "09:30:15", "14:00", "23:59:59"]);
    }

    #[test]
    fn time_of_day_serde_rejects_garbage() {
        let result: Result<TimeOfDay, _> = serde_json::from_str("\"noon\"");
        assert!(result.is_err());
        let parsed: TimeOfDay = serde_json::from_str("\"07:05\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"07:05\"");
    }
}

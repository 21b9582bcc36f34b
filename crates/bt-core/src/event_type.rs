//! Event and diaper type enums as the single source of truth for their strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// The kinds of care event that can be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Feeding,
    Diaper,
    Temperature,
}

impl EventType {
    /// Canonical string, as written to the log.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::Diaper => "diaper",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feeding" | "drink" => Ok(Self::Feeding),
            "diaper" => Ok(Self::Diaper),
            "temperature" | "temp" => Ok(Self::Temperature),
            _ => Err(ValidationError::UnknownEventType {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// What a diaper change contained.
///
/// Values outside the three canonical types are kept as [`DiaperType::Other`]
/// so they survive a rewrite of the log; they are never tallied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiaperType {
    Pooped,
    Peed,
    Both,
    Other(String),
}

impl DiaperType {
    /// Reads a stored value, normalizing the legacy `urine` alias to `peed`.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "pooped" => Self::Pooped,
            "peed" | "urine" => Self::Peed,
            "both" => Self::Both,
            other => Self::Other(other.to_string()),
        }
    }

    /// String representation for log storage.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pooped => "pooped",
            Self::Peed => "peed",
            Self::Both => "both",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label used in listings.
    pub fn label(&self) -> &str {
        match self {
            Self::Pooped => "pooped",
            Self::Peed => "peed",
            Self::Both => "pooped + peed",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for DiaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiaperType {
    type Err = ValidationError;

    /// Parses user input. Only the canonical types and the `urine` alias are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_stored(s) {
            Self::Other(value) => Err(ValidationError::UnknownDiaperType { value }),
            known => Ok(known),
        }
    }
}

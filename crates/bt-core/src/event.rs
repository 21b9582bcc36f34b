//! Care events and the day-keyed log that holds them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event_type::{DiaperType, EventType};
use crate::types::{Celsius, FeedingAmount, TimeOfDay, UserInitial};

/// All recorded events, bucketed by civil date.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`.
pub type EventLog = BTreeMap<NaiveDate, Vec<Event>>;

/// A single recorded care event.
///
/// The stored form is a flat JSON object:
///
/// ```json
/// {"time": "14:05:12", "type": "feeding", "amount_ml": 120, "user": "A"}
/// ```
///
/// Fields this version does not know about are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Local time of day the event happened.
    pub time: TimeOfDay,
    /// What happened.
    pub kind: EventKind,
    /// Initial of the person who recorded it, or `?`.
    pub user: String,
    /// Unrecognized fields, preserved verbatim.
    pub extra: Map<String, Value>,
}

/// The type-specific payload of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A bottle feeding.
    Feeding { amount_ml: u32 },
    /// A diaper change.
    Diaper { diaper_type: DiaperType },
    /// A body temperature reading.
    Temperature { celsius: f64 },
    /// A kind written by some other version. Its payload lives in `extra`.
    Unknown { kind: String },
}

impl EventKind {
    /// Returns the known event type, or `None` for unknown kinds.
    pub const fn event_type(&self) -> Option<EventType> {
        match self {
            Self::Feeding { .. } => Some(EventType::Feeding),
            Self::Diaper { .. } => Some(EventType::Diaper),
            Self::Temperature { .. } => Some(EventType::Temperature),
            Self::Unknown { .. } => None,
        }
    }

    fn type_str(&self) -> &str {
        match self {
            Self::Unknown { kind } => kind,
            known => known.event_type().map_or("", EventType::as_str),
        }
    }
}

impl Event {
    fn new(time: TimeOfDay, kind: EventKind, user: UserInitial) -> Self {
        Self {
            time,
            kind,
            user: user.to_tag(),
            extra: Map::new(),
        }
    }

    /// A bottle feeding of a validated amount.
    pub fn feeding(time: TimeOfDay, amount: FeedingAmount, user: UserInitial) -> Self {
        Self::new(
            time,
            EventKind::Feeding {
                amount_ml: amount.ml(),
            },
            user,
        )
    }

    /// A diaper change.
    pub fn diaper(time: TimeOfDay, diaper_type: DiaperType, user: UserInitial) -> Self {
        Self::new(time, EventKind::Diaper { diaper_type }, user)
    }

    /// A validated temperature reading.
    pub fn temperature(time: TimeOfDay, celsius: Celsius, user: UserInitial) -> Self {
        Self::new(
            time,
            EventKind::Temperature {
                celsius: celsius.value(),
            },
            user,
        )
    }

    /// Returns true if this event is of the given type.
    pub fn is(&self, event_type: EventType) -> bool {
        self.kind.event_type() == Some(event_type)
    }
}

impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("time", &self.time)?;
        map.serialize_entry("type", self.kind.type_str())?;
        match &self.kind {
            EventKind::Feeding { amount_ml } => map.serialize_entry("amount_ml", amount_ml)?,
            EventKind::Diaper { diaper_type } => {
                map.serialize_entry("diaper_type", diaper_type.as_str())?;
            }
            EventKind::Temperature { celsius } => {
                map.serialize_entry("temperature_celsius", celsius)?;
            }
            EventKind::Unknown { .. } => {}
        }
        map.serialize_entry("user", &self.user)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let mut fields: Map<String, Value> = Map::deserialize(deserializer)?;

        let time = match fields.remove("time") {
            Some(Value::String(s)) => TimeOfDay::parse(&s).map_err(D::Error::custom)?,
            _ => return Err(D::Error::missing_field("time")),
        };
        let kind_str = match fields.remove("type") {
            Some(Value::String(s)) => s,
            _ => return Err(D::Error::missing_field("type")),
        };
        let user = match fields.remove("user") {
            Some(Value::String(s)) => s,
            Some(other) => return Err(D::Error::custom(format!("invalid user: {other}"))),
            None => UserInitial::UNKNOWN.to_tag(),
        };

        let kind = match kind_str.as_str() {
            "feeding" | "drink" => {
                let amount_ml = fields
                    .remove("amount_ml")
                    .and_then(|v| v.as_u64())
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| D::Error::custom("feeding needs a non-negative amount_ml"))?;
                EventKind::Feeding { amount_ml }
            }
            "diaper" => {
                let diaper_type = match fields.remove("diaper_type") {
                    Some(Value::String(s)) => DiaperType::from_stored(&s),
                    _ => return Err(D::Error::missing_field("diaper_type")),
                };
                EventKind::Diaper { diaper_type }
            }
            "temperature" => {
                let celsius = fields
                    .remove("temperature_celsius")
                    .and_then(|v| v.as_f64())
                    .ok_or_else(|| D::Error::missing_field("temperature_celsius"))?;
                EventKind::Temperature { celsius }
            }
            _ => EventKind::Unknown { kind: kind_str },
        };

        Ok(Self {
            time,
            kind,
            user,
            extra: fields,
        })
    }
}

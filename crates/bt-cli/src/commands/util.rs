//! Shared utilities for CLI commands.

use bt_core::{Event, EventKind};

/// One-line description of an event, e.g. `09:00 - 90ml [A]`.
pub fn describe(event: &Event) -> String {
    let what = match &event.kind {
        EventKind::Feeding { amount_ml } => format!("{amount_ml}ml"),
        EventKind::Diaper { diaper_type } => diaper_type.label().to_string(),
        EventKind::Temperature { celsius } => format!("{celsius:.1}°C"),
        EventKind::Unknown { kind } => kind.clone(),
    };
    format!("{} - {what} [{}]", event.time, event.user)
}

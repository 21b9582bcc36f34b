//! Undo command: delete today's most recent event of a type.

use std::io::Write;

use anyhow::Result;

use bt_core::{Clock, EventType};
use bt_store::{DeleteOutcome, Tracker};

use crate::commands::util::describe;

pub fn run<W: Write, C: Clock>(writer: &mut W, tracker: &Tracker<C>, kind: &str) -> Result<()> {
    let event_type: EventType = kind.parse()?;

    match tracker.undo_last(event_type)? {
        DeleteOutcome::Removed(event) => {
            writeln!(writer, "Deleted {event_type}: {}", describe(&event))?;
        }
        DeleteOutcome::NoDataToday => {
            writeln!(writer, "Nothing recorded today.")?;
        }
        DeleteOutcome::NoneOfKind(kind) => {
            writeln!(writer, "No {kind} recorded today.")?;
        }
    }
    Ok(())
}

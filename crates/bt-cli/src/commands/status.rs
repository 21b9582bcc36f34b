//! Status command: where data lives and what happened most recently today.

use std::io::Write;

use anyhow::Result;

use bt_core::{Clock, EventType};
use bt_store::Tracker;

pub fn run<W: Write, C: Clock>(writer: &mut W, tracker: &Tracker<C>) -> Result<()> {
    let now = tracker.clock().now();
    let days = tracker.store().load().len();

    writeln!(writer, "Baby tracker status")?;
    writeln!(writer, "Data file: {}", tracker.store().path().display())?;
    writeln!(writer, "Timezone: {}", now.timezone().name())?;
    writeln!(writer, "Days recorded: {days}")?;
    writeln!(writer, "Today ({}):", tracker.today())?;

    for event_type in [EventType::Feeding, EventType::Diaper, EventType::Temperature] {
        match tracker.last_event_of(event_type) {
            Some(event) => {
                let time = event.time.to_string();
                writeln!(
                    writer,
                    "- {event_type}: {time} ({})",
                    tracker.relative_to_now(&time)
                )?;
            }
            None => writeln!(writer, "- {event_type}: none")?,
        }
    }

    Ok(())
}

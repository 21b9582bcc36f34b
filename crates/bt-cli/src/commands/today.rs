//! Today view: every event of the current date, grouped by type.

use std::io::Write;

use anyhow::Result;

use bt_core::{Clock, Event, EventType};
use bt_store::Tracker;

use crate::commands::util::describe;
use crate::render::format_temperature;

pub fn run<W: Write, C: Clock>(writer: &mut W, tracker: &Tracker<C>) -> Result<()> {
    let today = tracker.today();
    let events = tracker.today_events();

    if events.is_empty() {
        writeln!(writer, "No events recorded today ({today}).")?;
        return Ok(());
    }

    let summary = tracker.day_summary(today);
    writeln!(writer, "Today ({today})")?;

    let feedings = of_type(&events, EventType::Feeding);
    write_section(writer, "Feedings", &feedings)?;
    if let Some(last) = feedings.last() {
        writeln!(
            writer,
            "  Total: {}ml, last {}",
            summary.total_ml,
            tracker.relative_to_now(&last.time.to_string())
        )?;
    }

    let temperatures = of_type(&events, EventType::Temperature);
    write_section(writer, "Temperatures", &temperatures)?;
    if !temperatures.is_empty() {
        writeln!(
            writer,
            "  Average: {}",
            format_temperature(summary.avg_temperature)
        )?;
    }

    let diapers = of_type(&events, EventType::Diaper);
    write_section(writer, "Diapers", &diapers)?;
    if !diapers.is_empty() {
        writeln!(
            writer,
            "  Pooped {}, peed {}, both {}",
            summary.diapers.pooped, summary.diapers.peed, summary.diapers.both
        )?;
    }

    Ok(())
}

fn of_type(events: &[Event], event_type: EventType) -> Vec<&Event> {
    events.iter().filter(|e| e.is(event_type)).collect()
}

fn write_section<W: Write>(writer: &mut W, heading: &str, events: &[&Event]) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{heading}:")?;
    if events.is_empty() {
        writeln!(writer, "  none")?;
    }
    for event in events {
        writeln!(writer, "  {}", describe(event))?;
    }
    Ok(())
}

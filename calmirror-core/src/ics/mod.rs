//! ICS document handling.
//!
//! Stored records are always produced by encoding one component and decoding
//! it again, so the Event kept alongside a record is exactly what a later
//! read of that record yields.

mod document;
mod generate;
mod parse;

pub use document::{CalendarDocument, IcsDocument};
pub use generate::generate_component;
pub use parse::parse_event;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventRecord};

/// Decode a stored record into its Event.
pub fn read_record(
    doc: &dyn CalendarDocument,
    bytes: &[u8],
    calendar: &str,
) -> CalendarResult<Event> {
    let component = doc
        .decode(bytes)?
        .into_iter()
        .next()
        .ok_or_else(|| CalendarError::Parse("no events in file".into()))?;

    parse_event(&component, calendar)
        .ok_or_else(|| CalendarError::Parse("event has no UID".into()))
}

/// Wrap a feed component as a standalone record for `calendar`.
pub fn record_from_component(
    doc: &dyn CalendarDocument,
    component: &icalendar::Event,
    calendar: &str,
) -> CalendarResult<EventRecord> {
    // Checked up front: the writer invents a UID for components missing one
    if parse_event(component, calendar).is_none() {
        return Err(CalendarError::Parse("event has no UID".into()));
    }

    let document = doc.encode(component)?;
    let event = read_record(doc, &document, calendar)?;
    Ok(EventRecord { event, document })
}

/// Build a record from an Event alone.
pub fn record_from_event(doc: &dyn CalendarDocument, event: &Event) -> CalendarResult<EventRecord> {
    record_from_component(doc, &generate_component(event), &event.calendar)
}

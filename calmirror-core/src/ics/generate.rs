//! VEVENT generation from an [`Event`].

use chrono::Utc;
use icalendar::{Component, EventLike, Property, ValueType};

use crate::event::{Event, Instant};

/// Build a VEVENT component carrying the Event's fields.
///
/// Timed instants are written in UTC; all-day starts and ends are written as
/// `VALUE=DATE`. Empty text fields and missing instants are left out.
pub fn generate_component(event: &Event) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }

    if !event.location.is_empty() {
        ics_event.location(&event.location);
    }

    add_datetime_property(&mut ics_event, "DTSTART", event.start, event.all_day);
    add_datetime_property(&mut ics_event, "DTEND", event.end, event.all_day);

    ics_event.done()
}

fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    instant: Instant,
    all_day: bool,
) {
    let Some(dt) = instant else {
        return;
    };

    if all_day {
        let mut prop = Property::new(name, dt.date_naive().format("%Y%m%d").to_string());
        prop.append_parameter(ValueType::Date);
        ics_event.append_property(prop);
    } else {
        let utc = dt.with_timezone(&Utc);
        ics_event.add_property(name, utc.format("%Y%m%dT%H%M%SZ").to_string());
    }
}

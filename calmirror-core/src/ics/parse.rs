//! Projection of a decoded VEVENT into an [`Event`].

use icalendar::{Component, Parameter, Property};

use crate::event::Event;
use crate::time::{resolve, Resolved, TimeParams};

/// Project a VEVENT component into an Event owned by `calendar`.
///
/// Returns `None` when the component has no usable UID.
pub fn parse_event(component: &icalendar::Event, calendar: &str) -> Option<Event> {
    let uid = component.property_value("UID")?.trim();
    if uid.is_empty() {
        return None;
    }

    let text = |name: &str| {
        component
            .property_value(name)
            .map(str::to_string)
            .unwrap_or_default()
    };

    let start = resolve_property(component.properties().get("DTSTART"));
    let end = resolve_property(component.properties().get("DTEND"));

    Some(Event {
        uid: uid.to_string(),
        summary: text("SUMMARY"),
        description: text("DESCRIPTION"),
        location: text("LOCATION"),
        start: start.instant,
        end: end.instant,
        calendar: calendar.to_string(),
        all_day: start.all_day,
    })
}

fn resolve_property(prop: Option<&Property>) -> Resolved {
    let Some(prop) = prop else {
        return Resolved::ABSENT;
    };

    let params = prop.params();
    let time_params = TimeParams {
        value_type: params.get("VALUE").map(Parameter::value),
        tzid: params.get("TZID").map(Parameter::value),
    };

    resolve(prop.value(), &time_params)
}

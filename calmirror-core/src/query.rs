//! Read-only queries across every configured source.

use std::cmp::Ordering;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, Instant};
use crate::source::Source;
use crate::store::EventStore;

pub struct QueryEngine<'a> {
    store: &'a EventStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a EventStore) -> Self {
        QueryEngine { store }
    }

    /// Events of all `sources` starting within `[from, to]`, ordered by start.
    pub fn list_events(&self, sources: &[Source], from: Instant, to: Instant) -> Vec<Event> {
        let mut events: Vec<Event> = sources
            .iter()
            .filter_map(|source| match self.store.list_all(&source.name) {
                Ok(events) => Some(events),
                Err(e) => {
                    log::debug!("skipping calendar {}: {e}", source.name);
                    None
                }
            })
            .flatten()
            .filter(|event| event.starts_within(from, to))
            .collect();

        events.sort_by(compare_events);
        events
    }

    /// The first event with `uid`, searching `sources` in order, with its raw record.
    pub fn get_event(&self, sources: &[Source], uid: &str) -> CalendarResult<(Event, Vec<u8>)> {
        for source in sources {
            match self.store.find(&source.name, uid) {
                Ok(Some(found)) => return Ok(found),
                Ok(None) => {}
                Err(e) => log::debug!("skipping calendar {}: {e}", source.name),
            }
        }

        Err(CalendarError::event_not_found(uid))
    }
}

/// Ascending by start (missing starts first), then calendar, then uid.
fn compare_events(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.calendar.cmp(&b.calendar))
        .then_with(|| a.uid.cmp(&b.uid))
}

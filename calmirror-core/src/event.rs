//! Event types.
//!
//! An [`Event`] is a projection of one VEVENT component from a stored record.
//! It is always recomputed from the record and never edited by hand.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

/// A point in time as resolved from a calendar property.
/// `None` stands for a missing or unparseable value.
pub type Instant = Option<DateTime<FixedOffset>>;

/// A calendar event belonging to one configured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: Instant,
    pub end: Instant,
    /// Name of the source this event was synced from.
    pub calendar: String,
    pub all_day: bool,
}

impl Event {
    /// Whether the start lies within `[from, to]`; `None` bounds are open.
    ///
    /// A missing start sorts before every real instant, so it only
    /// matches when `from` is unbounded.
    pub fn starts_within(&self, from: Instant, to: Instant) -> bool {
        if let Some(from) = from {
            match self.start {
                Some(start) if start >= from => {}
                _ => return false,
            }
        }

        if let (Some(to), Some(start)) = (to, self.start) {
            if start > to {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

/// An event together with the serialized single-event document it came from.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event: Event,
    pub document: Vec<u8>,
}

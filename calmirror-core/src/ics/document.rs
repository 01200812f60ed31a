//! The calendar document capability: bytes in, VEVENT components out, and back.

use icalendar::{Calendar, CalendarComponent};

use crate::error::{CalendarError, CalendarResult};

/// Decodes calendar documents into event components and encodes a single
/// component back into a standalone document.
pub trait CalendarDocument {
    /// Every VEVENT in the document, in document order.
    fn decode(&self, bytes: &[u8]) -> CalendarResult<Vec<icalendar::Event>>;

    /// A complete calendar document holding only `component`.
    fn encode(&self, component: &icalendar::Event) -> CalendarResult<Vec<u8>>;
}

/// [`CalendarDocument`] backed by the `icalendar` crate.
#[derive(Debug, Clone)]
pub struct IcsDocument {
    product_id: String,
}

impl IcsDocument {
    pub fn new(product_id: impl Into<String>) -> Self {
        IcsDocument {
            product_id: product_id.into(),
        }
    }

    /// Clean up ICS output from the icalendar crate
    /// - Replace PRODID with our own
    /// - Remove CALSCALE:GREGORIAN (it's the default)
    fn strip_bloat(&self, ics: &str) -> String {
        let mut result = String::with_capacity(ics.len());

        for line in ics.lines() {
            if line.starts_with("PRODID:") {
                result.push_str("PRODID:");
                result.push_str(&self.product_id);
                result.push_str("\r\n");
                continue;
            }

            if line == "CALSCALE:GREGORIAN" {
                continue;
            }

            result.push_str(line);
            result.push_str("\r\n");
        }

        result
    }
}

impl CalendarDocument for IcsDocument {
    fn decode(&self, bytes: &[u8]) -> CalendarResult<Vec<icalendar::Event>> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| CalendarError::Parse(format!("not valid UTF-8: {e}")))?;

        let starts_like_calendar = content
            .trim_start_matches('\u{feff}')
            .trim_start()
            .get(..15)
            .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
        if !starts_like_calendar {
            return Err(CalendarError::Parse("missing BEGIN:VCALENDAR".into()));
        }

        let calendar: Calendar = content
            .trim_start_matches('\u{feff}')
            .parse::<Calendar>()
            .map_err(|e| CalendarError::Parse(e.to_string()))?;

        let events = calendar
            .components
            .into_iter()
            .filter_map(|component| match component {
                CalendarComponent::Event(event) => Some(event),
                _ => None,
            })
            .collect();

        Ok(events)
    }

    fn encode(&self, component: &icalendar::Event) -> CalendarResult<Vec<u8>> {
        let mut cal = Calendar::new();
        cal.push(component.clone());
        let cal = cal.done();

        Ok(self.strip_bloat(&cal.to_string()).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icalendar::Component;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//Feed//EN\r\n\
BEGIN:VEVENT\r\n\
UID:one@example.com\r\n\
DTSTAMP:20240301T000000Z\r\n\
SUMMARY:First\r\n\
DTSTART:20240315T090000Z\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
UID:todo@example.com\r\n\
SUMMARY:Not an event\r\n\
END:VTODO\r\n\
BEGIN:VEVENT\r\n\
UID:two@example.com\r\n\
DTSTAMP:20240301T000000Z\r\n\
SUMMARY:Second\r\n\
DTSTART;VALUE=DATE:20240316\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_decode_returns_only_events_in_order() {
        let doc = IcsDocument::new("-//test//EN");

        let events = doc.decode(FEED.as_bytes()).unwrap();

        let uids: Vec<_> = events.iter().filter_map(|e| e.get_uid()).collect();
        assert_eq!(uids, vec!["one@example.com", "two@example.com"]);
    }

    #[test]
    fn test_encode_wraps_single_event_with_own_envelope() {
        let doc = IcsDocument::new("-//test//EN");
        let events = doc.decode(FEED.as_bytes()).unwrap();

        let encoded = String::from_utf8(doc.encode(&events[1]).unwrap()).unwrap();

        assert!(encoded.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(encoded.contains("VERSION:2.0\r\n"));
        assert!(encoded.contains("PRODID:-//test//EN\r\n"));
        assert!(!encoded.contains("CALSCALE"));
        assert!(encoded.contains("UID:two@example.com"));
        assert!(!encoded.contains("one@example.com"));
        assert_eq!(encoded.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn test_encoded_event_decodes_again() {
        let doc = IcsDocument::new("-//test//EN");
        let events = doc.decode(FEED.as_bytes()).unwrap();

        let encoded = doc.encode(&events[0]).unwrap();
        let again = doc.decode(&encoded).unwrap();

        assert_eq!(again.len(), 1);
        assert_eq!(again[0].get_uid(), Some("one@example.com"));
        assert_eq!(again[0].get_summary(), Some("First"));
    }

    #[test]
    fn test_html_is_not_a_calendar() {
        let doc = IcsDocument::new("-//test//EN");

        let err = doc
            .decode(b"<!doctype html><html><body>Sign in</body></html>")
            .unwrap_err();

        assert!(matches!(err, CalendarError::Parse(_)));
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let doc = IcsDocument::new("-//test//EN");
        let err = doc.decode(&[0x42, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CalendarError::Parse(_)));
    }
}

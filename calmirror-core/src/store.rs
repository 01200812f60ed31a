//! Per-source event record storage.
//!
//! Layout: `<config dir>/events/<source name>/<sanitized uid>.ics`, one
//! single-event calendar document per file.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventRecord};
use crate::ics::{read_record, CalendarDocument};
use crate::paths::Paths;

const RECORD_EXTENSION: &str = "ics";

/// Map a uid to its record filename.
///
/// Path-hostile characters become `_` and `@` becomes `_at_`.
pub fn record_filename(uid: &str) -> String {
    let mut name = String::with_capacity(uid.len() + 4);
    for c in uid.chars() {
        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => name.push('_'),
            '@' => name.push_str("_at_"),
            _ => name.push(c),
        }
    }
    name.push('.');
    name.push_str(RECORD_EXTENSION);
    name
}

fn is_record(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == RECORD_EXTENSION)
}

pub struct EventStore {
    paths: Paths,
    doc: Rc<dyn CalendarDocument>,
}

impl EventStore {
    pub fn new(paths: Paths, doc: Rc<dyn CalendarDocument>) -> Self {
        EventStore { paths, doc }
    }

    pub fn calendar_dir(&self, source: &str) -> PathBuf {
        self.paths.calendar_dir(source)
    }

    /// Replace every stored record of `source` with `records`.
    ///
    /// A record that fails to write is logged and skipped. Returns the number
    /// of records on disk afterwards; duplicate uids count once.
    pub fn replace_all(&self, source: &str, records: &[EventRecord]) -> CalendarResult<usize> {
        let dir = self.calendar_dir(source);
        std::fs::create_dir_all(&dir)?;

        // Clear existing records before writing fresh data
        for path in self.record_paths(&dir)? {
            if let Err(e) = std::fs::remove_file(&path) {
                log::warn!("could not remove {}: {e}", path.display());
            }
        }

        let mut written: HashSet<String> = HashSet::new();
        for record in records {
            let filename = record_filename(&record.event.uid);
            let path = dir.join(&filename);

            match std::fs::write(&path, &record.document) {
                Ok(()) => {
                    written.insert(filename);
                }
                Err(e) => log::warn!("could not write {}: {e}", path.display()),
            }
        }

        Ok(written.len())
    }

    /// Every readable event of `source`. Corrupt records are skipped.
    pub fn list_all(&self, source: &str) -> CalendarResult<Vec<Event>> {
        Ok(self
            .entries(source)?
            .into_iter()
            .map(|(event, _)| event)
            .collect())
    }

    /// The exact bytes stored for `uid`.
    pub fn get_raw(&self, source: &str, uid: &str) -> CalendarResult<Vec<u8>> {
        let path = self.calendar_dir(source).join(record_filename(uid));

        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CalendarError::event_not_found(uid)),
            Err(e) => Err(e.into()),
        }
    }

    /// Find the record whose decoded uid is `uid`.
    pub fn find(&self, source: &str, uid: &str) -> CalendarResult<Option<(Event, Vec<u8>)>> {
        Ok(self
            .entries(source)?
            .into_iter()
            .find(|(event, _)| event.uid == uid))
    }

    /// Delete the whole directory of `source`.
    pub fn purge(&self, source: &str) -> CalendarResult<()> {
        match std::fs::remove_dir_all(self.calendar_dir(source)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn record_paths(&self, dir: &Path) -> CalendarResult<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_record(path))
            .collect();

        paths.sort();
        Ok(paths)
    }

    /// Decoded events with their raw bytes, in filename order.
    fn entries(&self, source: &str) -> CalendarResult<Vec<(Event, Vec<u8>)>> {
        let dir = self.calendar_dir(source);

        let entries = self
            .record_paths(&dir)?
            .into_iter()
            .filter_map(|path| {
                let bytes = std::fs::read(&path)
                    .map_err(|e| log::debug!("skipping {}: {e}", path.display()))
                    .ok()?;
                let event = read_record(self.doc.as_ref(), &bytes, source)
                    .map_err(|e| log::debug!("skipping {}: {e}", path.display()))
                    .ok()?;
                Some((event, bytes))
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::{record_from_event, IcsDocument};
    use chrono::{FixedOffset, TimeZone};
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> EventStore {
        EventStore::new(Paths::new(tmp.path()), Rc::new(IcsDocument::new("TEST")))
    }

    fn make_event(uid: &str, hour: u32) -> Event {
        let offset = FixedOffset::east_opt(0).unwrap();
        Event {
            uid: uid.to_string(),
            summary: format!("Event {uid}"),
            description: "Bring slides".to_string(),
            location: "Room 4".to_string(),
            start: Some(offset.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap()),
            end: Some(offset.with_ymd_and_hms(2024, 3, 15, hour + 1, 0, 0).unwrap()),
            calendar: "work".to_string(),
            all_day: false,
        }
    }

    fn record(event: &Event) -> EventRecord {
        record_from_event(&IcsDocument::new("TEST"), event).unwrap()
    }

    #[test]
    fn test_record_filename_replaces_hostile_characters() {
        assert_eq!(record_filename("abc@google.com"), "abc_at_google.com.ics");
        assert_eq!(record_filename(r#"a/b\c:d*e?f"g<h>i|j"#), "a_b_c_d_e_f_g_h_i_j.ics");
        assert_eq!(record_filename("plain-uid"), "plain-uid.ics");
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let original = make_event("meeting@example.com", 9);

        let count = store.replace_all("work", &[record(&original)]).unwrap();
        let events = store.list_all("work").unwrap();

        assert_eq!(count, 1);
        assert_eq!(events.len(), 1);
        let read = &events[0];
        assert_eq!(read.uid, original.uid);
        assert_eq!(read.summary, original.summary);
        assert_eq!(read.description, original.description);
        assert_eq!(read.location, original.location);
        assert_eq!(read.start, original.start);
        assert_eq!(read.end, original.end);
        assert_eq!(read.all_day, original.all_day);
        assert_eq!(read.calendar, "work");
    }

    #[test]
    fn test_round_trip_keeps_backslashes_and_separators() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let mut original = make_event("text@example.com", 9);
        original.summary = r"Path C:\new\temp, room 4; floor 2".to_string();
        original.description = "literal \\, and \\n here\nsecond line; done".to_string();
        original.location = r"Hall\B, east".to_string();

        store.replace_all("work", &[record(&original)]).unwrap();
        let read = store.list_all("work").unwrap().remove(0);

        assert_eq!(read.summary, original.summary);
        assert_eq!(read.description, original.description);
        assert_eq!(read.location, original.location);
    }

    #[test]
    fn test_all_day_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let mut original = make_event("holiday", 0);
        original.all_day = true;
        original.end = None;

        store.replace_all("work", &[record(&original)]).unwrap();
        let read = store.list_all("work").unwrap().remove(0);

        assert!(read.all_day);
        assert_eq!(read.start, original.start);
    }

    #[test]
    fn test_replace_all_clears_previous_records() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .replace_all("work", &[record(&make_event("old", 9))])
            .unwrap();
        store
            .replace_all("work", &[record(&make_event("new", 10))])
            .unwrap();

        let uids: Vec<_> = store
            .list_all("work")
            .unwrap()
            .into_iter()
            .map(|e| e.uid)
            .collect();
        assert_eq!(uids, vec!["new"]);
    }

    #[test]
    fn test_duplicate_uids_count_once() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let first = make_event("dup", 9);
        let mut second = make_event("dup", 11);
        second.summary = "Later copy".to_string();

        let count = store
            .replace_all("work", &[record(&first), record(&second)])
            .unwrap();

        assert_eq!(count, 1);
        let events = store.list_all("work").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Later copy");
    }

    #[test]
    fn test_failed_write_does_not_abort_the_rest() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        // Longer than any filesystem's filename limit
        let too_long = "x".repeat(400);

        let count = store
            .replace_all(
                "work",
                &[
                    record(&make_event("a", 9)),
                    record(&make_event(&too_long, 10)),
                    record(&make_event("b", 11)),
                ],
            )
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.list_all("work").unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_records_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .replace_all("work", &[record(&make_event("good", 9))])
            .unwrap();

        let dir = store.calendar_dir("work");
        std::fs::write(dir.join("garbage.ics"), "this is not a calendar").unwrap();
        std::fs::write(
            dir.join("empty.ics"),
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\nEND:VCALENDAR\r\n",
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let events = store.list_all("work").unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid, "good");
    }

    #[test]
    fn test_list_all_on_missing_directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let err = store.list_all("never-synced").unwrap_err();
        assert!(matches!(err, CalendarError::Io(_)));
    }

    #[test]
    fn test_get_raw_returns_written_bytes() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let rec = record(&make_event("raw@example.com", 9));

        store.replace_all("work", std::slice::from_ref(&rec)).unwrap();

        assert_eq!(store.get_raw("work", "raw@example.com").unwrap(), rec.document);
        assert!(matches!(
            store.get_raw("work", "missing").unwrap_err(),
            CalendarError::NotFound(_)
        ));
    }

    #[test]
    fn test_find_matches_decoded_uid() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let rec = record(&make_event("findme@example.com", 9));
        store.replace_all("work", std::slice::from_ref(&rec)).unwrap();

        let (event, bytes) = store
            .find("work", "findme@example.com")
            .unwrap()
            .expect("Should find event");

        assert_eq!(event.uid, "findme@example.com");
        assert_eq!(bytes, rec.document);
        assert!(store.find("work", "other").unwrap().is_none());
    }

    #[test]
    fn test_purge_removes_directory_and_tolerates_absence() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .replace_all("work", &[record(&make_event("a", 9))])
            .unwrap();

        store.purge("work").unwrap();
        assert!(!store.calendar_dir("work").exists());

        store.purge("work").unwrap();
    }
}

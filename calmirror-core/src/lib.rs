//! Core library for calmirror.
//!
//! Keeps a local, file-based mirror of remote iCalendar feeds:
//! - `source` for the registry of configured feeds
//! - `sync` for fetching feeds into the `store`
//! - `query` for range and uid lookups across all sources
//! - `manager` tying them together for front-ends

pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod manager;
pub mod paths;
pub mod query;
pub mod settings;
pub mod source;
pub mod store;
pub mod sync;
pub mod time;

pub use date_range::DateRange;
pub use error::{CalendarError, CalendarResult};
pub use event::{Event, EventRecord, Instant};
pub use manager::CalendarManager;
pub use paths::{EnvPathProvider, PathProvider, Paths};
pub use settings::Settings;
pub use source::Source;
pub use sync::{Fetcher, HttpFetcher, SourceSyncResult, SyncObserver};

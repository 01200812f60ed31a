//! Error types for calmirror.

use thiserror::Error;

/// Errors that can occur in calmirror operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("calendar {0:?} already exists")]
    DuplicateName(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("fetching calendar: {0}")]
    Fetch(String),

    #[error("parsing calendar: {0}")]
    Parse(String),

    #[error("no calendars configured, use 'add' to add one")]
    NoSources,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalendarError {
    pub fn source_not_found(name: &str) -> Self {
        CalendarError::NotFound(format!("calendar {name:?}"))
    }

    pub fn event_not_found(uid: &str) -> Self {
        CalendarError::NotFound(format!("event {uid:?}"))
    }
}

/// Result type alias for calmirror operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

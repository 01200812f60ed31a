//! Configuration directory layout.
//!
//! The base directory is resolved once per process by a [`PathProvider`] and
//! handed to the registry and the event store as a [`Paths`] value.

use std::path::{Path, PathBuf};

use crate::error::{CalendarError, CalendarResult};

/// Environment variable that overrides the configuration directory.
pub const DIR_ENV: &str = "CALENDAR_DIR";

const SOURCES_FILE: &str = "sources.json";
const SETTINGS_FILE: &str = "config.toml";
const EVENTS_DIR: &str = "events";

/// Supplies the base configuration directory.
pub trait PathProvider {
    fn base_dir(&self) -> CalendarResult<PathBuf>;
}

/// Reads `CALENDAR_DIR`, falling back to the platform config dir.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvPathProvider;

impl PathProvider for EnvPathProvider {
    fn base_dir(&self) -> CalendarResult<PathBuf> {
        if let Ok(dir) = std::env::var(DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(shellexpand::tilde(&dir).into_owned()));
            }
        }

        let dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("calendar");
        Ok(dir)
    }
}

/// A fixed directory, mostly useful for tests and embedding.
impl PathProvider for PathBuf {
    fn base_dir(&self) -> CalendarResult<PathBuf> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Paths {
    dir: PathBuf,
}

impl Paths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Paths { dir: dir.into() }
    }

    pub fn resolve(provider: &dyn PathProvider) -> CalendarResult<Self> {
        Ok(Paths::new(provider.base_dir()?))
    }

    /// Create the configuration directory if it doesn't exist.
    pub fn ensure_dir(&self) -> CalendarResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sources_file(&self) -> PathBuf {
        self.dir.join(SOURCES_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn events_dir(&self) -> PathBuf {
        self.dir.join(EVENTS_DIR)
    }

    /// Directory holding one source's event records.
    pub fn calendar_dir(&self, name: &str) -> PathBuf {
        self.events_dir().join(name)
    }
}

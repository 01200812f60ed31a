//! Configured calendar sources and their persistence in `sources.json`.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;

use crate::error::{CalendarError, CalendarResult};
use crate::paths::Paths;
use crate::store::EventStore;

/// A remote feed mirrored under a unique local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

/// The ordered list of sources, persisted as a pretty-printed JSON array.
pub struct SourceRegistry {
    paths: Paths,
}

impl SourceRegistry {
    pub fn new(paths: Paths) -> Self {
        SourceRegistry { paths }
    }

    /// Load all sources in insertion order. A missing file is an empty registry.
    pub fn load(&self) -> CalendarResult<Vec<Source>> {
        let path = self.paths.sources_file();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let sources = serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        Ok(sources)
    }

    /// Overwrite the registry file with `sources`.
    pub fn save(&self, sources: &[Source]) -> CalendarResult<()> {
        self.paths.ensure_dir()?;

        let contents = serde_json::to_string_pretty(sources)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        std::fs::write(self.paths.sources_file(), contents)?;

        Ok(())
    }

    pub fn get(&self, name: &str) -> CalendarResult<Source> {
        self.load()?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CalendarError::source_not_found(name))
    }

    /// Append a new source and persist the registry.
    pub fn add(&self, name: &str, url: &str) -> CalendarResult<Source> {
        validate_name(name)?;
        validate_url(url)?;

        let mut sources = self.load()?;
        if sources.iter().any(|s| s.name == name) {
            return Err(CalendarError::DuplicateName(name.to_string()));
        }

        let source = Source {
            name: name.to_string(),
            url: url.to_string(),
        };
        sources.push(source.clone());
        self.save(&sources)?;

        Ok(source)
    }

    /// Drop a source from the registry and delete its stored events.
    ///
    /// Failing to delete the events is logged; the source is removed anyway.
    pub fn remove(&self, name: &str, store: &EventStore) -> CalendarResult<()> {
        let mut sources = self.load()?;
        let before = sources.len();
        sources.retain(|s| s.name != name);

        if sources.len() == before {
            return Err(CalendarError::source_not_found(name));
        }

        if let Err(e) = store.purge(name) {
            log::warn!("could not delete events for {name:?}: {e}");
        }

        self.save(&sources)
    }
}

fn validate_name(name: &str) -> CalendarResult<()> {
    if name.trim().is_empty() {
        return Err(CalendarError::InvalidInput("name is required".into()));
    }

    // The name doubles as a directory under events/
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(CalendarError::InvalidInput(format!(
            "name {name:?} cannot be used as a directory name"
        )));
    }

    Ok(())
}

fn validate_url(url: &str) -> CalendarResult<()> {
    if url.trim().is_empty() {
        return Err(CalendarError::InvalidInput("url is required".into()));
    }

    url::Url::parse(url)
        .map_err(|e| CalendarError::InvalidInput(format!("invalid url {url:?}: {e}")))?;

    Ok(())
}

//! The operation interface used by front-ends.

use std::rc::Rc;

use crate::error::CalendarResult;
use crate::event::{Event, Instant};
use crate::ics::{CalendarDocument, IcsDocument};
use crate::paths::{EnvPathProvider, Paths};
use crate::query::QueryEngine;
use crate::settings::Settings;
use crate::source::{Source, SourceRegistry};
use crate::store::EventStore;
use crate::sync::{Fetcher, HttpFetcher, SourceSyncResult, SyncEngine, SyncObserver};

/// Wires the registry, store, sync and query engines to one config directory.
pub struct CalendarManager {
    paths: Paths,
    settings: Settings,
    doc: Rc<dyn CalendarDocument>,
    registry: SourceRegistry,
    store: EventStore,
    fetcher: Box<dyn Fetcher>,
}

impl CalendarManager {
    /// Resolve the config directory from the environment and load its settings.
    pub fn from_env() -> CalendarResult<Self> {
        let paths = Paths::resolve(&EnvPathProvider)?;
        paths.ensure_dir()?;
        let settings = Settings::load(&paths)?;

        Self::new(paths, settings)
    }

    pub fn new(paths: Paths, settings: Settings) -> CalendarResult<Self> {
        let fetcher = HttpFetcher::new(&settings.user_agent)?;
        Ok(Self::with_fetcher(paths, settings, Box::new(fetcher)))
    }

    pub fn with_fetcher(paths: Paths, settings: Settings, fetcher: Box<dyn Fetcher>) -> Self {
        let doc: Rc<dyn CalendarDocument> = Rc::new(IcsDocument::new(settings.product_id.clone()));

        CalendarManager {
            registry: SourceRegistry::new(paths.clone()),
            store: EventStore::new(paths.clone(), doc.clone()),
            paths,
            settings,
            doc,
            fetcher,
        }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn list_sources(&self) -> CalendarResult<Vec<Source>> {
        self.registry.load()
    }

    pub fn source(&self, name: &str) -> CalendarResult<Source> {
        self.registry.get(name)
    }

    pub fn add_source(&self, name: &str, url: &str) -> CalendarResult<Source> {
        self.registry.add(name, url)
    }

    /// Remove a source together with its stored events.
    pub fn remove_source(&self, name: &str) -> CalendarResult<()> {
        self.registry.remove(name, &self.store)
    }

    pub fn sync_all(&self) -> CalendarResult<Vec<SourceSyncResult>> {
        self.sync_sources(&self.registry.load()?, &mut ())
    }

    /// Sync `sources` in order, reporting progress to `observer`.
    pub fn sync_sources(
        &self,
        sources: &[Source],
        observer: &mut dyn SyncObserver,
    ) -> CalendarResult<Vec<SourceSyncResult>> {
        self.sync_engine().sync_all_with(sources, observer)
    }

    pub fn list_events(&self, from: Instant, to: Instant) -> CalendarResult<Vec<Event>> {
        let sources = self.registry.load()?;
        Ok(QueryEngine::new(&self.store).list_events(&sources, from, to))
    }

    /// The event with `uid` and its raw record, first source in registry order.
    pub fn get_event(&self, uid: &str) -> CalendarResult<(Event, Vec<u8>)> {
        let sources = self.registry.load()?;
        QueryEngine::new(&self.store).get_event(&sources, uid)
    }

    /// Raw record of the event with `uid`.
    pub fn event_ics(&self, uid: &str) -> CalendarResult<Vec<u8>> {
        self.get_event(uid).map(|(_, raw)| raw)
    }

    /// Raw record stored for `event` under its own calendar.
    pub fn event_record(&self, event: &Event) -> CalendarResult<Vec<u8>> {
        self.store.get_raw(&event.calendar, &event.uid)
    }

    fn sync_engine(&self) -> SyncEngine<'_> {
        SyncEngine::new(self.fetcher.as_ref(), self.doc.as_ref(), &self.store)
    }
}

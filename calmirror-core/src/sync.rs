//! Pulling remote feeds into the event store.
//!
//! Every sync is a full refresh: the source's stored records are replaced by
//! whatever the feed contains now.

use crate::error::{CalendarError, CalendarResult};
use crate::event::EventRecord;
use crate::ics::{record_from_component, CalendarDocument};
use crate::source::Source;
use crate::store::EventStore;

/// Retrieves the raw bytes of a feed.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> CalendarResult<Vec<u8>>;
}

/// [`Fetcher`] over HTTP(S) using a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> CalendarResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| CalendarError::Fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpFetcher { client })
    }
}

/// `webcal://` is a hint for calendar apps; the feed itself is served over https.
fn http_url(url: &str) -> String {
    match url.strip_prefix("webcal://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> CalendarResult<Vec<u8>> {
        let response = self
            .client
            .get(http_url(url))
            .send()
            .map_err(|e| CalendarError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::Fetch(format!("unexpected status: {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| CalendarError::Fetch(format!("reading response body: {e}")))?;

        Ok(body.to_vec())
    }
}

/// Outcome of syncing a single source.
#[derive(Debug)]
pub struct SourceSyncResult {
    pub source: String,
    pub outcome: CalendarResult<usize>,
}

/// Hooks called around each source during [`SyncEngine::sync_all_with`].
pub trait SyncObserver {
    fn started(&mut self, _source: &Source) {}
    fn finished(&mut self, _source: &Source, _outcome: &CalendarResult<usize>) {}
}

impl SyncObserver for () {}

pub struct SyncEngine<'a> {
    fetcher: &'a dyn Fetcher,
    doc: &'a dyn CalendarDocument,
    store: &'a EventStore,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        doc: &'a dyn CalendarDocument,
        store: &'a EventStore,
    ) -> Self {
        SyncEngine {
            fetcher,
            doc,
            store,
        }
    }

    /// Fetch one source and replace its stored events. Returns the number persisted.
    pub fn sync_one(&self, source: &Source) -> CalendarResult<usize> {
        let bytes = self.fetcher.fetch(&source.url)?;
        let components = self.doc.decode(&bytes)?;

        let mut records: Vec<EventRecord> = Vec::with_capacity(components.len());
        for component in &components {
            match record_from_component(self.doc, component, &source.name) {
                Ok(record) => records.push(record),
                Err(e) => log::debug!("{}: skipping component: {e}", source.name),
            }
        }

        self.store.replace_all(&source.name, &records)
    }

    /// Sync every source in order. One failing source doesn't stop the others.
    pub fn sync_all(&self, sources: &[Source]) -> CalendarResult<Vec<SourceSyncResult>> {
        self.sync_all_with(sources, &mut ())
    }

    /// [`Self::sync_all`], reporting each source to `observer`.
    pub fn sync_all_with(
        &self,
        sources: &[Source],
        observer: &mut dyn SyncObserver,
    ) -> CalendarResult<Vec<SourceSyncResult>> {
        if sources.is_empty() {
            return Err(CalendarError::NoSources);
        }

        let results = sources
            .iter()
            .map(|source| {
                log::info!("syncing {} from {}", source.name, source.url);
                observer.started(source);

                let outcome = self.sync_one(source);
                match &outcome {
                    Ok(count) => log::info!("{}: {count} events synced", source.name),
                    Err(e) => log::warn!("{}: {e}", source.name),
                }
                observer.finished(source, &outcome);

                SourceSyncResult {
                    source: source.name.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(results)
    }
}

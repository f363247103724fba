//! Fetch, cache and normalize catalogs on demand.

use super::{CacheStore, Catalog, CatalogPayload, Fetcher, Progress};
use crate::Result;
use crate::normalize::{SentinelSet, Table, normalize};
use core::sync::atomic::{AtomicU64, Ordering};
use futures::future::join_all;
use std::sync::Arc;

const LOG_TARGET: &str = "  catalogs";

/// Entry point for obtaining catalog data.
///
/// Reads go through the cache store; misses go to the network through the fetcher.
#[derive(Debug)]
pub struct Catalogs {
    store: CacheStore,
    fetcher: Fetcher,
    sentinels: SentinelSet,
}

impl Catalogs {
    #[must_use]
    pub const fn new(store: CacheStore, fetcher: Fetcher, sentinels: SentinelSet) -> Self {
        Self { store, fetcher, sentinels }
    }

    /// Raw records for one catalog, from the cache when fresh.
    pub async fn payload(&self, catalog: Catalog) -> Result<CatalogPayload> {
        self.store.get_or_fetch(catalog, || self.fetcher.fetch_catalog(catalog)).await
    }

    /// The normalized table for one catalog.
    pub async fn get_table(&self, catalog: Catalog) -> Result<Table> {
        let payload = self.payload(catalog).await?;
        Ok(self.to_table(&payload))
    }

    /// Normalizes an already obtained payload.
    #[must_use]
    pub fn to_table(&self, payload: &CatalogPayload) -> Table {
        normalize(payload.catalog.schema(), &payload.records, &self.sentinels)
    }

    /// Obtains several catalogs concurrently, reporting progress as they complete.
    ///
    /// Results come back in the order requested.
    pub async fn payloads(&self, catalogs: &[Catalog], progress: &dyn Progress) -> Vec<Result<CatalogPayload>> {
        let total = catalogs.len() as u64;
        let finished = Arc::new(AtomicU64::new(0));
        let stats = self.fetcher.stats();

        progress.set_phase("Fetching");
        let finished_for_progress = Arc::clone(&finished);
        progress.set_determinate(Box::new(move || {
            (
                total,
                finished_for_progress.load(Ordering::Relaxed),
                format!("{} page(s), {} record(s) downloaded", stats.pages(), stats.records()),
            )
        }));

        let results = join_all(catalogs.iter().map(|&catalog| {
            let finished = Arc::clone(&finished);
            async move {
                let result = self.payload(catalog).await;
                let _ = finished.fetch_add(1, Ordering::Relaxed);
                result
            }
        }))
        .await;

        progress.done();
        log::debug!(target: LOG_TARGET, "Obtained {} catalog(s)", results.len());
        results
    }
}

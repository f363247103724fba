//! A TTL-aware cache of whole catalogs.
//!
//! [`CacheStore`] wraps a backend, the freshness window and a clock so that
//! callers only ever ask for a catalog and get records back.

use super::cache_backend::CacheBackend;
use super::cache_lock::CacheLockGuard;
use super::{Catalog, FetchOutcome, RawRecord};
use crate::Result;
use chrono::{DateTime, Utc};
use core::fmt::{Debug, Formatter};
use core::time::Duration;
use ohno::{AppError, IntoAppError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "     cache";

/// How long a cached catalog stays fresh.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// On-disk representation of a cached catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub resource: String,

    pub timestamp: DateTime<Utc>,

    /// False when the walk that produced `data` stopped early.
    #[serde(default = "complete_by_default")]
    pub complete: bool,

    pub data: Vec<RawRecord>,
}

const fn complete_by_default() -> bool {
    true
}

/// Where a [`CatalogPayload`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Cache,
    Network,
}

/// Records for one catalog along with how they were obtained.
#[derive(Debug)]
pub struct CatalogPayload {
    pub catalog: Catalog,
    pub records: Vec<RawRecord>,
    pub source: PayloadSource,
    pub fetched_at: DateTime<Utc>,
    pub complete: bool,

    /// The fetch error when `complete` is false and the records came from the network.
    pub error: Option<AppError>,
}

/// Source of the current time for freshness checks and entry timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Serves catalogs from a backend while they are fresh, otherwise fetches and stores them.
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    clock: Clock,
    ignore: bool,
    locks: HashMap<Catalog, tokio::sync::Mutex<()>>,
}

impl CacheStore {
    /// Create a store that reads the system clock on every check.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>, ignore_cached: bool) -> Self {
        Self::with_clock(backend, Arc::new(Utc::now), ignore_cached)
    }

    /// Create a store whose clock is pinned to `now`.
    #[must_use]
    pub fn fixed_at(backend: Arc<dyn CacheBackend>, now: DateTime<Utc>, ignore_cached: bool) -> Self {
        Self::with_clock(backend, Arc::new(move || now), ignore_cached)
    }

    /// Create a store using the standard freshness window and the given clock.
    #[must_use]
    pub fn with_clock(backend: Arc<dyn CacheBackend>, clock: Clock, ignore_cached: bool) -> Self {
        Self {
            backend,
            ttl: FRESHNESS_WINDOW,
            clock,
            ignore: ignore_cached,
            locks: Catalog::iter().map(|c| (c, tokio::sync::Mutex::new(()))).collect(),
        }
    }

    /// The current time according to this store's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Load the cached entry for a catalog if it exists and is still fresh.
    ///
    /// Missing, unreadable, corrupt and stale entries all count as a miss.
    #[must_use]
    pub fn load(&self, catalog: Catalog) -> Option<CacheEntry> {
        if self.ignore {
            return None;
        }

        let name = catalog.name();
        let bytes = match self.backend.read(name) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {name}: no entry");
                return None;
            }
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {name}: {e:#}");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {name}: {e:#}");
                return None;
            }
        };

        // Handle future timestamps (clock skew) as fresh data
        let age = self.now().signed_duration_since(entry.timestamp);
        if age.num_seconds() < 0 {
            log::debug!(target: LOG_TARGET, "Cache timestamp is in the future for {name} (clock skew detected), treating as fresh");
        } else {
            let age_duration = age.to_std().unwrap_or(Duration::MAX);

            if age_duration >= self.ttl {
                log::debug!(
                    target: LOG_TARGET,
                    "Cache expired for {name} (age: {:.1} days, TTL: {:.1} days)",
                    age_duration.as_secs_f64() / 86400.0,
                    self.ttl.as_secs_f64() / 86400.0
                );
                return None;
            }

            log::debug!(target: LOG_TARGET, "Cache hit for {name} (age: {:.1} days)", age_duration.as_secs_f64() / 86400.0);
        }

        Some(entry)
    }

    /// Persist an entry, replacing whatever was stored for its catalog.
    pub fn save(&self, catalog: Catalog, entry: &CacheEntry) -> Result<()> {
        #[cfg(debug_assertions)]
        let bytes = serde_json::to_vec_pretty(entry);
        #[cfg(not(debug_assertions))]
        let bytes = serde_json::to_vec(entry);

        let bytes = bytes.into_app_err_with(|| format!("serializing cache entry for {catalog}"))?;
        self.backend.write(catalog.name(), &bytes)
    }

    /// Return a fresh cached copy of a catalog, or run `fetch` and store what it returns.
    ///
    /// Access to any one catalog is serialized, so concurrent callers never see
    /// a half-written entry and only one of them goes to the network.
    /// Failing to persist is logged and does not fail the call.
    pub async fn get_or_fetch<F, Fut>(&self, catalog: Catalog, fetch: F) -> Result<CatalogPayload>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchOutcome>,
    {
        let _local = match self.locks.get(&catalog) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };
        let _guard = self.lock(catalog).await?;

        if let Some(entry) = self.load(catalog) {
            if !entry.complete {
                log::warn!(target: LOG_TARGET, "Cached {catalog} catalog is incomplete ({} record(s))", entry.data.len());
            }

            return Ok(CatalogPayload {
                catalog,
                records: entry.data,
                source: PayloadSource::Cache,
                fetched_at: entry.timestamp,
                complete: entry.complete,
                error: None,
            });
        }

        let outcome = fetch().await;
        let complete = outcome.is_complete();
        if !complete {
            log::warn!(
                target: LOG_TARGET,
                "Storing incomplete {catalog} catalog ({} record(s)); it will be served until it expires",
                outcome.records.len()
            );
        }

        let entry = CacheEntry {
            resource: catalog.name().to_string(),
            timestamp: self.now(),
            complete,
            data: outcome.records,
        };

        if let Err(e) = self.save(catalog, &entry) {
            log::warn!(target: LOG_TARGET, "Could not save {catalog} to the cache: {e:#}");
        }

        Ok(CatalogPayload {
            catalog,
            records: entry.data,
            source: PayloadSource::Network,
            fetched_at: entry.timestamp,
            complete,
            error: outcome.error,
        })
    }

    async fn lock(&self, catalog: Catalog) -> Result<Option<CacheLockGuard>> {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || backend.lock(catalog.name()))
            .await
            .into_app_err("lock task panicked")?
    }
}

impl Debug for CacheStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CacheStore")
            .field("backend", &self.backend)
            .field("ttl", &self.ttl)
            .field("clock", &"<clock>")
            .field("ignore", &self.ignore)
            .finish_non_exhaustive()
    }
}

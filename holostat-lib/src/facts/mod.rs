//! Obtaining raw catalog data.
//!
//! The [`Fetcher`] walks the paginated API, the [`CacheStore`] keeps whole
//! catalogs on disk for a week, and [`Catalogs`] ties both to the normalizer.

mod cache;
mod cache_backend;
mod cache_lock;
mod catalog;
mod catalogs;
mod fetcher;
mod progress;
mod raw_record;

pub use cache::{CacheEntry, CacheStore, CatalogPayload, FRESHNESS_WINDOW, PayloadSource};
pub use cache_backend::{CacheBackend, DirBackend, MemoryBackend};
pub use cache_lock::CacheLockGuard;
pub use catalog::Catalog;
pub use catalogs::Catalogs;
pub use fetcher::{FetchOutcome, FetchStats, Fetcher};
pub use progress::{NoProgress, Progress};
pub use raw_record::RawRecord;

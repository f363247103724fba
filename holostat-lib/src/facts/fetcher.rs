//! Walks a paginated collection endpoint until the server stops handing out `next` links.

use super::{Catalog, RawRecord};
use crate::Result;
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use ohno::{AppError, IntoAppError, app_err};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

const LOG_TARGET: &str = "   fetcher";

/// One page of a collection response. Extra envelope fields such as `count` are ignored.
///
/// Items are kept untyped so a single malformed entry cannot reject the page.
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    results: Option<Vec<Value>>,

    #[serde(default)]
    next: Option<String>,
}

impl Page {
    /// Converts the page items to records, one per item. Non-object items become empty records.
    fn into_records(self, url: &Url) -> (Vec<RawRecord>, Option<String>) {
        let mut malformed = 0;
        let records: Vec<RawRecord> = self
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => RawRecord::from(fields),
                _ => {
                    malformed += 1;
                    RawRecord::default()
                }
            })
            .collect();

        if malformed > 0 {
            log::warn!(target: LOG_TARGET, "Page '{url}' held {malformed} item(s) that are not objects; they are kept as empty records");
        }

        (records, self.next)
    }
}

/// The result of walking a collection.
///
/// When a page fails, `records` still holds everything gathered before the
/// failure and `error` says what went wrong.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<RawRecord>,
    pub pages: u64,
    pub error: Option<AppError>,
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    fn failed(records: Vec<RawRecord>, pages: u64, error: AppError) -> Self {
        Self {
            records,
            pages,
            error: Some(error),
        }
    }
}

/// Running totals across every walk performed by a [`Fetcher`].
#[derive(Debug, Default)]
pub struct FetchStats {
    pages: AtomicU64,
    records: AtomicU64,
}

impl FetchStats {
    #[must_use]
    pub fn pages(&self) -> u64 {
        self.pages.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn records(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    fn record_page(&self, records: usize) {
        let _ = self.pages.fetch_add(1, Ordering::Relaxed);
        let _ = self.records.fetch_add(records as u64, Ordering::Relaxed);
    }
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: Url,
    stats: Arc<FetchStats>,
}

impl Fetcher {
    /// Creates a fetcher rooted at `base_url`. A trailing slash is added if missing.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).into_app_err_with(|| format!("parsing base URL '{base_url}'"))?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .into_app_err("creating HTTP client")?;

        Ok(Self {
            client,
            base_url,
            stats: Arc::new(FetchStats::default()),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn stats(&self) -> Arc<FetchStats> {
        Arc::clone(&self.stats)
    }

    /// The first page URL for a catalog.
    pub fn start_url(&self, catalog: Catalog) -> Result<Url> {
        self.base_url
            .join(catalog.path())
            .into_app_err_with(|| format!("building URL for '{catalog}' from '{}'", self.base_url))
    }

    /// Fetches every record of a catalog, in server order.
    pub async fn fetch_catalog(&self, catalog: Catalog) -> FetchOutcome {
        let start = match self.start_url(catalog) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::failed(Vec::new(), 0, e),
        };

        log::info!(target: LOG_TARGET, "Fetching {catalog} from '{start}'");
        let outcome = self.fetch_all(&start).await;

        if let Some(e) = &outcome.error {
            log::warn!(
                target: LOG_TARGET,
                "Fetching {catalog} stopped after {} page(s) and {} record(s): {e:#}",
                outcome.pages,
                outcome.records.len()
            );
        } else {
            log::info!(target: LOG_TARGET, "Fetched {} {catalog} record(s) in {} page(s)", outcome.records.len(), outcome.pages);
        }

        outcome
    }

    /// Follows `next` links from `start_url` and concatenates every page's results.
    ///
    /// Relative `next` links are resolved against the page that carried them.
    /// A link that points back at an already visited page ends the walk with an error.
    pub async fn fetch_all(&self, start_url: &Url) -> FetchOutcome {
        let mut records = Vec::new();
        let mut pages = 0;
        let mut visited = HashSet::new();
        let mut current = Some(start_url.clone());

        while let Some(url) = current.take() {
            if !visited.insert(url.clone()) {
                return FetchOutcome::failed(records, pages, app_err!("pagination loop detected: '{url}' was already fetched"));
            }

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) => return FetchOutcome::failed(records, pages, e),
            };

            let (page_records, next) = page.into_records(&url);
            pages += 1;
            self.stats.record_page(page_records.len());
            log::debug!(target: LOG_TARGET, "Page '{url}' returned {} record(s)", page_records.len());
            records.extend(page_records);

            if let Some(next) = next {
                match url.join(&next) {
                    Ok(next_url) => current = Some(next_url),
                    Err(e) => {
                        let error = app_err!("invalid next link '{next}' on page '{url}': {e}");
                        return FetchOutcome::failed(records, pages, error);
                    }
                }
            }
        }

        FetchOutcome {
            records,
            pages,
            error: None,
        }
    }

    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("requesting '{url}'"))?
            .error_for_status()
            .into_app_err_with(|| format!("fetching '{url}'"))?;

        response.json::<Page>().await.into_app_err_with(|| format!("decoding page '{url}'"))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> Fetcher {
        Fetcher::new(base, "holostat-tests", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let f = fetcher("https://swapi.dev/api");
        assert_eq!(f.base_url().as_str(), "https://swapi.dev/api/");
    }

    #[test]
    fn start_url_appends_catalog_path() {
        let f = fetcher("https://swapi.dev/api/");
        assert_eq!(f.start_url(Catalog::Starships).unwrap().as_str(), "https://swapi.dev/api/starships/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let _ = Fetcher::new("not a url", "holostat-tests", Duration::from_secs(5)).unwrap_err();
    }

    fn page_url() -> Url {
        Url::parse("https://swapi.dev/api/people/").unwrap()
    }

    #[test]
    fn page_tolerates_missing_fields() {
        let page: Page = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        let (records, next) = page.into_records(&page_url());
        assert!(records.is_empty());
        assert!(next.is_none());

        let page: Page = serde_json::from_str(r#"{"results": [{"name": "Tatooine"}], "next": null}"#).unwrap();
        let (records, next) = page.into_records(&page_url());
        assert_eq!(records.len(), 1);
        assert!(next.is_none());
    }

    #[test]
    fn null_results_is_an_empty_page() {
        let page: Page = serde_json::from_str(r#"{"results": null, "next": "?page=2"}"#).unwrap();
        let (records, next) = page.into_records(&page_url());
        assert!(records.is_empty());
        assert_eq!(next.as_deref(), Some("?page=2"));
    }

    #[test]
    fn non_object_items_become_empty_records() {
        let page: Page = serde_json::from_str(r#"{"results": [{"name": "Luke"}, null, 7, {"name": "Leia"}]}"#).unwrap();
        let (records, _) = page.into_records(&page_url());
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].get("name"), Some(&Value::String("Luke".into())));
        assert!(records[1].is_empty());
        assert!(records[2].is_empty());
        assert_eq!(records[3].get("name"), Some(&Value::String("Leia".into())));
    }

    #[test]
    fn outcome_completeness_tracks_error() {
        let outcome = FetchOutcome::default();
        assert!(outcome.is_complete());

        let outcome = FetchOutcome::failed(vec![RawRecord::default()], 1, app_err!("boom"));
        assert!(!outcome.is_complete());
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn stats_accumulate() {
        let stats = FetchStats::default();
        stats.record_page(10);
        stats.record_page(5);
        assert_eq!(stats.pages(), 2);
        assert_eq!(stats.records(), 15);
    }
}

//! Integration tests for cache freshness against a directory backend and a mock API

use chrono::{TimeDelta, Utc};
use core::time::Duration;
use holostat_lib::facts::{CacheEntry, CacheStore, Catalog, DirBackend, Fetcher, PayloadSource, RawRecord};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(name: &str) -> RawRecord {
    let mut map = Map::new();
    let _ = map.insert("name".to_string(), Value::String(name.to_string()));
    RawRecord::from(map)
}

async fn mount_films(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/films/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "results": [{ "title": "A New Hope" }, { "title": "The Empire Strikes Back" }],
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn seed(dir: &std::path::Path, age: TimeDelta) -> CacheStore {
    let now = Utc::now();
    let store = CacheStore::fixed_at(Arc::new(DirBackend::new(dir).unwrap()), now, false);
    let entry = CacheEntry {
        resource: "films".to_string(),
        timestamp: now - age,
        complete: true,
        data: vec![record("cached")],
    };
    store.save(Catalog::Films, &entry).unwrap();
    store
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call mkdir")]
async fn stale_entry_triggers_fetch() {
    let server = MockServer::start().await;
    mount_films(&server, 1).await;

    let temp_dir = tempfile::tempdir().unwrap();
    let store = seed(temp_dir.path(), TimeDelta::days(8));
    let fetcher = Fetcher::new(&format!("{}/api/", server.uri()), "holostat-tests", Duration::from_secs(5)).unwrap();

    let payload = store.get_or_fetch(Catalog::Films, || fetcher.fetch_catalog(Catalog::Films)).await.unwrap();

    assert_eq!(payload.source, PayloadSource::Network);
    assert!(payload.complete);
    assert_eq!(payload.records.len(), 2);

    // The refreshed entry replaced the stale one on disk
    let reloaded = store.load(Catalog::Films).unwrap();
    assert_eq!(reloaded.data.len(), 2);
    assert_eq!(reloaded.timestamp, store.now());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call mkdir")]
async fn fresh_entry_skips_network() {
    let server = MockServer::start().await;
    mount_films(&server, 0).await;

    let temp_dir = tempfile::tempdir().unwrap();
    let store = seed(temp_dir.path(), TimeDelta::days(1));
    let fetcher = Fetcher::new(&format!("{}/api/", server.uri()), "holostat-tests", Duration::from_secs(5)).unwrap();

    let payload = store.get_or_fetch(Catalog::Films, || fetcher.fetch_catalog(Catalog::Films)).await.unwrap();

    assert_eq!(payload.source, PayloadSource::Cache);
    assert_eq!(payload.records.len(), 1);
    assert_eq!(payload.records[0].get("name"), Some(&Value::String("cached".to_string())));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call mkdir")]
async fn cache_survives_a_new_store() {
    let server = MockServer::start().await;
    mount_films(&server, 1).await;

    let temp_dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(&format!("{}/api/", server.uri()), "holostat-tests", Duration::from_secs(5)).unwrap();

    let first = CacheStore::fixed_at(Arc::new(DirBackend::new(temp_dir.path()).unwrap()), Utc::now(), false);
    let payload = first.get_or_fetch(Catalog::Films, || fetcher.fetch_catalog(Catalog::Films)).await.unwrap();
    assert_eq!(payload.source, PayloadSource::Network);

    let second = CacheStore::fixed_at(Arc::new(DirBackend::new(temp_dir.path()).unwrap()), Utc::now(), false);
    let payload = second.get_or_fetch(Catalog::Films, || fetcher.fetch_catalog(Catalog::Films)).await.unwrap();
    assert_eq!(payload.source, PayloadSource::Cache);
    assert_eq!(payload.records.len(), 2);
}

//! Storage backends for cache entries.
//!
//! A backend only moves opaque bytes around by resource name. Freshness and
//! envelope handling live in [`CacheStore`](super::CacheStore).

use super::cache_lock::{CacheLockGuard, lock_resource};
use crate::Result;
use core::fmt::Debug;
use ohno::IntoAppError;
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Byte storage keyed by resource name.
pub trait CacheBackend: Send + Sync + Debug {
    /// Read the stored bytes for a resource, or `None` if nothing is stored.
    fn read(&self, resource: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the stored bytes for a resource.
    ///
    /// Readers must never observe a partially written entry.
    fn write(&self, resource: &str, bytes: &[u8]) -> Result<()>;

    /// Take an exclusive lock on a resource, blocking until it is granted.
    ///
    /// Backends that are never shared across processes return `None`.
    fn lock(&self, resource: &str) -> Result<Option<CacheLockGuard>>;
}

/// Stores each resource as `<dir>/<resource>.json`.
#[derive(Debug, Clone)]
pub struct DirBackend {
    dir: PathBuf,
}

impl DirBackend {
    /// Opens a cache directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).into_app_err_with(|| format!("creating cache directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn entry_path(&self, resource: &str) -> PathBuf {
        self.dir.join(format!("{resource}.json"))
    }
}

impl CacheBackend for DirBackend {
    fn read(&self, resource: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(resource);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).into_app_err_with(|| format!("reading cache file '{}'", path.display())),
        }
    }

    fn write(&self, resource: &str, bytes: &[u8]) -> Result<()> {
        let path = self.entry_path(resource);
        let tmp_path = self.dir.join(format!("{resource}.json.tmp"));

        fs::create_dir_all(&self.dir).into_app_err_with(|| format!("creating cache directory '{}'", self.dir.display()))?;

        let file = fs::File::create(&tmp_path).into_app_err_with(|| format!("creating cache file '{}'", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(bytes)
            .into_app_err_with(|| format!("writing cache file '{}'", tmp_path.display()))?;
        let file = writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
            .into_app_err_with(|| format!("flushing cache file '{}'", tmp_path.display()))?;
        file.sync_all()
            .into_app_err_with(|| format!("syncing cache file '{}'", tmp_path.display()))?;

        fs::rename(&tmp_path, &path).into_app_err_with(|| format!("replacing cache file '{}'", path.display()))
    }

    fn lock(&self, resource: &str) -> Result<Option<CacheLockGuard>> {
        lock_resource(&self.dir, resource).map(Some)
    }
}

/// Keeps entries in memory; used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry directly, bypassing any envelope handling.
    pub fn insert(&self, resource: &str, bytes: impl Into<Vec<u8>>) {
        let _ = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.to_string(), bytes.into());
    }

    #[must_use]
    pub fn contains(&self, resource: &str) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).contains_key(resource)
    }
}

impl CacheBackend for MemoryBackend {
    fn read(&self, resource: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(resource).cloned())
    }

    fn write(&self, resource: &str, bytes: &[u8]) -> Result<()> {
        self.insert(resource, bytes);
        Ok(())
    }

    fn lock(&self, _resource: &str) -> Result<Option<CacheLockGuard>> {
        Ok(None)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn dir_backend_round_trips_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(tmp.path()).unwrap();

        backend.write("films", b"[1,2,3]").unwrap();
        assert_eq!(backend.read("films").unwrap().unwrap(), b"[1,2,3]");
        assert!(tmp.path().join("films.json").exists());
        assert!(!tmp.path().join("films.json.tmp").exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn dir_backend_missing_entry_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(tmp.path()).unwrap();
        assert!(backend.read("people").unwrap().is_none());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn dir_backend_overwrites_existing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(tmp.path()).unwrap();

        backend.write("planets", b"old contents that are longer").unwrap();
        backend.write("planets", b"new").unwrap();
        assert_eq!(backend.read("planets").unwrap().unwrap(), b"new");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn dir_backend_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let backend = DirBackend::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(backend.entry_path("species"), nested.join("species.json"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn dir_backend_lock_returns_guard() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(tmp.path()).unwrap();
        let guard = backend.lock("vehicles").unwrap();
        assert!(guard.is_some());
        assert!(tmp.path().join("vehicles.lock").exists());
    }

    #[test]
    fn memory_backend_round_trips_bytes() {
        let backend = MemoryBackend::new();
        assert!(backend.read("films").unwrap().is_none());

        backend.write("films", b"{}").unwrap();
        assert!(backend.contains("films"));
        assert_eq!(backend.read("films").unwrap().unwrap(), b"{}");
        assert!(backend.lock("films").unwrap().is_none());
    }
}

use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Log target for `cache_lock`
const LOG_TARGET: &str = "     cache";

/// Guard that releases a resource lock when dropped
#[derive(Debug)]
pub struct CacheLockGuard(File);

impl Drop for CacheLockGuard {
    fn drop(&mut self) {
        // Lock is automatically released when the file is closed
        if let Err(e) = FileExt::unlock(&self.0) {
            log::warn!(target: LOG_TARGET, "Could not unlock cache resource: {e:#}");
        }
    }
}

/// Acquire an exclusive advisory lock on `<cache_dir>/<resource>.lock`.
///
/// Blocks until the lock is granted, so async callers must run this on a blocking task.
pub fn lock_resource(cache_dir: &Path, resource: &str) -> Result<CacheLockGuard> {
    let lock_path = cache_dir.join(format!("{resource}.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening cache lock file at '{}'", lock_path.display()))?;

    file.lock_exclusive()
        .into_app_err_with(|| format!("acquiring exclusive lock on '{}'", lock_path.display()))?;
    log::debug!(target: LOG_TARGET, "Acquired cache lock at '{}'", lock_path.display());

    Ok(CacheLockGuard(file))
}

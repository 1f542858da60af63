//! Per-vessel run lock
//!
//! Two runs for the same MMSI would race on deleting and recreating the
//! staging directory. The CLI takes an advisory `fd-lock` on
//! `{temp_root}/vessel_track_{mmsi}.lock` for the lifetime of a run.

use super::{OutputError, OutputResult};
use fd_lock::{RwLock, RwLockWriteGuard};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Open handle on a vessel lock file
pub struct RunLock {
    path: PathBuf,
    lock: RwLock<File>,
}

impl RunLock {
    /// Open (creating if needed) the lock file at `path`
    pub fn open(path: &Path) -> OutputResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| OutputError::LockError(format!("Failed to open lock file: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            lock: RwLock::new(file),
        })
    }

    /// Take the exclusive lock without blocking
    ///
    /// The lock is held until the returned guard is dropped.
    ///
    /// # Errors
    /// [`OutputError::LockError`] if another process already holds it.
    pub fn try_acquire(&mut self) -> OutputResult<RwLockWriteGuard<'_, File>> {
        let path = self.path.display().to_string();
        self.lock.try_write().map_err(|e| {
            OutputError::LockError(format!(
                "another run is using {path} ({e}); wait for it to finish"
            ))
        })
    }
}

//! Snapshot persistence
//!
//! After every successful write the full database image is written to the
//! configured file. The write goes to a sibling temp file, is fsynced, and is
//! then renamed over the target, so the file always holds a complete snapshot.
//!
//! A write is not durable until `persist` returns Ok.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::{Store, StoreError, StoreResult};

/// Owns the location of the durable database file
#[derive(Debug, Clone)]
pub struct Persistence {
    path: PathBuf,
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the durable database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has been written before
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Open the store from the last snapshot, or empty if none exists yet.
    pub fn load(&self) -> StoreResult<Store> {
        if self.exists() {
            Store::load(&self.path)
        } else {
            Store::open_in_memory()
        }
    }

    /// Snapshot the store and replace the file contents with it.
    ///
    /// Returns the number of bytes written.
    pub fn persist(&self, store: &Store) -> StoreResult<u64> {
        let bytes = store.snapshot()?;
        self.write_atomic(&bytes)?;
        Ok(bytes.len() as u64)
    }

    fn write_atomic(&self, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::persist(&self.path, e))?;
            }
        }

        let temp_path = self.temp_path();
        let result = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&temp_path, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::persist(&self.path, e));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the embedded store and its persistence path
#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine rejected or failed to run a statement
    #[error("{0}")]
    Engine(#[from] rusqlite::Error),

    /// A snapshot file could not be restored into the store
    #[error("failed to load database from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The statement left a transaction open; it has been rolled back
    #[error("transactions must be committed or rolled back within a single query")]
    OpenTransaction,

    /// The database image could not be serialized
    #[error("failed to snapshot database: {0}")]
    Snapshot(#[source] rusqlite::Error),

    /// The snapshot could not be written to disk
    #[error("failed to persist database to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Build a persistence failure for the given target path
    pub fn persist(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Persist {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure happened after the statement itself succeeded
    pub fn is_durability_failure(&self) -> bool {
        matches!(self, StoreError::Snapshot(_) | StoreError::Persist { .. })
    }
}

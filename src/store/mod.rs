//! Embedded store for sqlgate
//!
//! Wraps a single in-memory SQLite connection. The on-disk snapshot file is
//! the durable state; the connection is a cache of it that is restored at
//! boot and serialized back after every successful write.
//!
//! # Operations
//!
//! - `execute`: run read statements, collect result sets
//! - `apply`: run mutating statements, report affected rows
//! - `snapshot`: serialize the full database image

mod adapter;
mod errors;
mod result;

pub use adapter::{ApplyOutcome, Store};
pub use errors::{StoreError, StoreResult};
pub use result::{ResultSet, TabularResult};

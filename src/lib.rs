//! sqlgate - An HTTP gateway for ad-hoc SQL against a single embedded,
//! file-backed database
//!
//! Requests are classified as reads or writes, executed against one SQLite
//! store held in memory, and every successful write is flushed to the
//! database file before the response goes out.

pub mod api;
pub mod cli;
pub mod gateway;
pub mod http_server;
pub mod observability;
pub mod store;

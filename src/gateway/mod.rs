//! Query gateway
//!
//! Accepts SQL text, routes it to the read or write path of the embedded
//! store, persists after writes and shapes results for the caller.
//!
//! # Flow
//!
//! request → classify → execute | apply + persist → shape → response
//!
//! # Known limitation
//!
//! Multi-statement input runs every statement, but only the first result set
//! is returned, and routing looks only at the first statement's keyword.

mod classifier;
mod handler;
mod persistence;
mod record;
mod request;
mod response;
mod shaper;

pub use classifier::{classify, QueryKind};
pub use handler::Gateway;
pub use persistence::Persistence;
pub use record::QueryRecord;
pub use request::QueryRequest;
pub use response::{QueryResponse, WriteAck};
pub use shaper::{shape, Row};

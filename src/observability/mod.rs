//! Observability for sqlgate
//!
//! - Structured logging (JSON lines)
//! - Per-query audit records
//!
//! # Usage
//!
//! ```ignore
//! use sqlgate::observability::Logger;
//!
//! Logger::info("SERVER_START", &[("addr", "0.0.0.0:3005")]);
//! ```

pub mod audit;
mod logger;

pub use audit::{AuditSink, LogAuditSink, MemoryAuditSink};
pub use logger::{Logger, Severity};

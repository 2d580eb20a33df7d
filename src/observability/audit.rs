//! Query audit sinks
//!
//! The gateway hands one `QueryRecord` to the configured sink after every
//! dispatched statement, whether it succeeded or not. Sinks must not fail the
//! request; anything they do is best effort.

use std::sync::{Arc, Mutex};

use crate::gateway::QueryRecord;

use super::logger::Logger;

/// Receives one record per dispatched statement
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &QueryRecord);
}

/// Writes each record as a `QUERY_EXECUTED` log line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAuditSink;

impl LogAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for LogAuditSink {
    fn record(&self, record: &QueryRecord) {
        let kind = record.kind.as_str().to_uppercase();
        let elapsed = record.execution_time_ms.to_string();
        let rows = record.rows_affected.map(|n| n.to_string());
        let last_id = record.last_insert_id.map(|n| n.to_string());

        let mut fields: Vec<(&str, &str)> = vec![
            ("kind", kind.as_str()),
            ("status", record.status()),
            ("query", record.query.as_str()),
            ("execution_time_ms", elapsed.as_str()),
        ];
        if let Some(ref rows) = rows {
            fields.push(("rows_affected", rows.as_str()));
        }
        if let Some(ref id) = last_id {
            fields.push(("last_insert_id", id.as_str()));
        }
        if let Some(ref err) = record.error {
            fields.push(("error", err.as_str()));
        }

        Logger::info("QUERY_EXECUTED", &fields);
    }
}

/// In-memory sink for testing.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditSink {
    records: Arc<Mutex<Vec<QueryRecord>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded entries.
    pub fn records(&self) -> Vec<QueryRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &QueryRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

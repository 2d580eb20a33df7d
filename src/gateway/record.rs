//! Per-request query record handed to the audit sink

use serde::{Deserialize, Serialize};

use super::classifier::QueryKind;

/// Outcome of one dispatched statement. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub query: String,
    pub kind: QueryKind,
    pub success: bool,
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_insert_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryRecord {
    /// Start a record for a statement about to be dispatched
    pub fn new(query: impl Into<String>, kind: QueryKind) -> Self {
        Self {
            query: query.into(),
            kind,
            success: false,
            execution_time_ms: 0,
            rows_affected: None,
            last_insert_id: None,
            error: None,
        }
    }

    /// Status label used in log output
    pub fn status(&self) -> &'static str {
        if self.success {
            "SUCCESS"
        } else {
            "FAIL"
        }
    }
}

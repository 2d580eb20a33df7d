//! Successful query responses

use serde::{Deserialize, Serialize};

use super::shaper::Row;

/// Acknowledgement body for write-class statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    pub success: bool,
}

/// Body returned for a successful `/query`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    /// Read-class result: one object per row, possibly empty
    Rows(Vec<Row>),
    /// Write-class acknowledgement
    Ack(WriteAck),
}

impl QueryResponse {
    pub fn ack() -> Self {
        QueryResponse::Ack(WriteAck { success: true })
    }
}

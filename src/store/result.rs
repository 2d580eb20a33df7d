//! Tabular results produced by the engine

use rusqlite::types::Value;

/// Column names plus row values for one statement that produced rows
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// All result sets produced by one `execute` call, in statement order.
///
/// Statements that produce no rows (DDL, DML, or a SELECT matching nothing)
/// contribute no result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularResult {
    pub sets: Vec<ResultSet>,
}

impl TabularResult {
    /// Whether no statement produced a result set
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The first result set, if any
    pub fn first(&self) -> Option<&ResultSet> {
        self.sets.first()
    }
}

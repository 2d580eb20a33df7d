//! Store adapter over an in-memory SQLite connection
//!
//! The store is exclusively owned; callers serialize access to it. Nothing
//! here locks or retries.

use std::path::Path;

use rusqlite::backup::Progress;
use rusqlite::types::Value;
use rusqlite::{Batch, Connection, DatabaseName};

use super::errors::{StoreError, StoreResult};
use super::result::{ResultSet, TabularResult};

/// Effect of a mutating statement, as far as the engine can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Rows inserted, updated or deleted by this call; zero for DDL
    pub rows_affected: u64,
    /// Rowid of an INSERT made by this call, if any
    pub last_insert_id: Option<i64>,
}

/// The single mutable relational store
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open an empty store
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Open a store populated from a snapshot file.
    ///
    /// The file is copied into memory; later writes do not touch it.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let mut store = Self::open_in_memory()?;
        store
            .conn
            .restore(DatabaseName::Main, path, None::<fn(Progress)>)
            .map_err(|source| StoreError::Load {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(store)
    }

    /// Run read statements and collect every non-empty result set.
    ///
    /// Multi-statement input is executed in order. A statement only yields a
    /// result set once it has produced at least one row.
    pub fn execute(&self, sql: &str) -> StoreResult<TabularResult> {
        let result = self.collect(sql);
        self.close_transaction(result)
    }

    fn collect(&self, sql: &str) -> StoreResult<TabularResult> {
        let mut result = TabularResult::default();
        let mut batch = Batch::new(&self.conn, sql);

        while let Some(mut stmt) = batch.next()? {
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();
            let width = columns.len();

            let mut rows = stmt.query([])?;
            let mut values = Vec::new();
            while let Some(row) = rows.next()? {
                let mut record = Vec::with_capacity(width);
                for idx in 0..width {
                    record.push(row.get::<_, Value>(idx)?);
                }
                values.push(record);
            }

            if !values.is_empty() {
                result.sets.push(ResultSet {
                    columns,
                    rows: values,
                });
            }
        }

        Ok(result)
    }

    /// Run mutating statements.
    ///
    /// Counts come from the connection-wide totals taken around the batch, so
    /// statements that change no rows report zero rather than the counts of
    /// an earlier INSERT/UPDATE/DELETE.
    pub fn apply(&self, sql: &str) -> StoreResult<ApplyOutcome> {
        let changes_before = self.total_changes()?;
        let rowid_before = self.conn.last_insert_rowid();

        let executed = self.conn.execute_batch(sql).map_err(StoreError::from);
        self.close_transaction(executed)?;

        let rows_affected = self.total_changes()?.saturating_sub(changes_before);
        let rowid = self.conn.last_insert_rowid();
        Ok(ApplyOutcome {
            rows_affected,
            last_insert_id: (rowid != rowid_before).then_some(rowid),
        })
    }

    /// Roll back a transaction the caller's SQL left open.
    ///
    /// A transaction never outlives the call that opened it. If the SQL itself
    /// succeeded, leaving the transaction open is reported as an error.
    fn close_transaction<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        if self.rollback_open_transaction()? {
            return result.and(Err(StoreError::OpenTransaction));
        }
        result
    }

    /// Roll back any open transaction; returns whether one was open
    pub fn rollback_open_transaction(&self) -> StoreResult<bool> {
        if self.conn.is_autocommit() {
            return Ok(false);
        }
        self.conn.execute_batch("ROLLBACK")?;
        Ok(true)
    }

    fn total_changes(&self) -> StoreResult<u64> {
        let total: i64 = self
            .conn
            .query_row("SELECT total_changes()", [], |row| row.get(0))?;
        Ok(total.max(0) as u64)
    }

    /// Serialize the whole database into the engine's native file format
    pub fn snapshot(&self) -> StoreResult<Vec<u8>> {
        let data = self
            .conn
            .serialize(DatabaseName::Main)
            .map_err(StoreError::Snapshot)?;
        Ok(data.to_vec())
    }
}

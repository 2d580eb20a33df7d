//! Gateway handler
//!
//! Orchestrates one query: readiness check, classification, dispatch against
//! the store, persistence on writes, result shaping and the audit record.
//!
//! The store sits behind a single mutex. It is held from dispatch through
//! persistence, so concurrent requests never interleave their store access
//! and the file on disk always reflects a whole number of writes.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Instant;

use crate::api::{GatewayError, GatewayResult};
use crate::observability::{AuditSink, Logger};
use crate::store::{Store, StoreResult};

use super::classifier::{classify, QueryKind};
use super::persistence::Persistence;
use super::record::QueryRecord;
use super::request::QueryRequest;
use super::response::QueryResponse;
use super::shaper::shape;

/// The query gateway. Owns the store once initialized.
pub struct Gateway {
    store: OnceLock<Mutex<Store>>,
    persistence: Persistence,
    audit: Option<Arc<dyn AuditSink>>,
}

impl Gateway {
    /// Create a gateway whose store is not yet loaded
    pub fn new(persistence: Persistence) -> Self {
        Self {
            store: OnceLock::new(),
            persistence,
            audit: None,
        }
    }

    /// Create a gateway around an already-open store
    pub fn with_store(store: Store, persistence: Persistence) -> Self {
        let gateway = Self::new(persistence);
        let _ = gateway.store.set(Mutex::new(store));
        gateway
    }

    /// Attach an audit sink
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Load the store from the persisted file, or start empty if there is none.
    ///
    /// Runs once; later calls are no-ops.
    pub fn initialize(&self) -> GatewayResult<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let existed = self.persistence.exists();
        let store = self
            .persistence
            .load()
            .map_err(|e| GatewayError::database("Failed to initialize database", e))?;

        if self.store.set(Mutex::new(store)).is_ok() {
            let path = self.persistence.path().display().to_string();
            let source = if existed { "file" } else { "new" };
            Logger::info("DATABASE_INITIALIZED", &[("path", path.as_str()), ("source", source)]);
        }

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.store.get().is_some()
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Execute one validated request.
    pub fn handle(&self, request: &QueryRequest) -> GatewayResult<QueryResponse> {
        let store = self.store.get().ok_or_else(GatewayError::not_initialized)?;
        let kind = classify(&request.sql);
        let mut record = QueryRecord::new(request.sql.as_str(), kind);

        let guard = lock_store(store)?;

        let started = Instant::now();
        let outcome = self.dispatch(&guard, kind, &request.sql, &mut record);
        record.execution_time_ms = started.elapsed().as_millis() as u64;
        drop(guard);

        match &outcome {
            Ok(_) => record.success = true,
            Err(e) => {
                if e.is_durability_failure() {
                    let path = self.persistence.path().display().to_string();
                    let message = e.to_string();
                    Logger::warn(
                        "PERSIST_FAILED",
                        &[("path", path.as_str()), ("message", message.as_str())],
                    );
                }
                record.error = Some(e.to_string());
            }
        }
        if let Some(sink) = &self.audit {
            sink.record(&record);
        }

        outcome.map_err(GatewayError::query_failed)
    }

    fn dispatch(
        &self,
        store: &Store,
        kind: QueryKind,
        sql: &str,
        record: &mut QueryRecord,
    ) -> StoreResult<QueryResponse> {
        match kind {
            QueryKind::Read => {
                let result = store.execute(sql)?;
                Ok(QueryResponse::Rows(shape(&result)))
            }
            QueryKind::Write => {
                let applied = store.apply(sql)?;
                record.rows_affected = Some(applied.rows_affected);
                record.last_insert_id = applied.last_insert_id;

                self.persistence.persist(store)?;
                Ok(QueryResponse::ack())
            }
        }
    }
}

/// Take the store lock, recovering it if an earlier holder panicked.
///
/// The panicking request may have left a transaction open; it is rolled back
/// before anyone else sees the store.
fn lock_store(store: &Mutex<Store>) -> GatewayResult<MutexGuard<'_, Store>> {
    match store.lock() {
        Ok(guard) => Ok(guard),
        Err(poisoned) => {
            let guard = poisoned.into_inner();
            store.clear_poison();

            let rolled_back = guard
                .rollback_open_transaction()
                .map_err(GatewayError::query_failed)?;
            Logger::warn(
                "STORE_LOCK_RECOVERED",
                &[("rolled_back", if rolled_back { "true" } else { "false" })],
            );
            Ok(guard)
        }
    }
}

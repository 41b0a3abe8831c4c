//! In-memory reference adapter.
//!
//! Keeps records in a process-local map; generated identifiers are UUID v4
//! strings. Suited to tests and demos where a real backend is not wanted.

use std::collections::HashMap;
use std::sync::RwLock;

use futures_util::future::BoxFuture;
use serde_json::Value;
use uuid::Uuid;

use super::backend::{InsertResult, PersistenceAdapter, UpdateResult};
use super::errors::{AdapterError, AdapterResult};

/// Process-local record store keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryAdapter {
    /// Create an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record stored under `id`, if any.
    pub fn get(&self, id: &Value) -> Option<Value> {
        let key = record_key(id);
        self.records.read().ok().and_then(|r| r.get(&key).cloned())
    }

    /// Number of records stored.
    pub fn record_count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn insert(&self, record: Value) -> BoxFuture<'_, AdapterResult<InsertResult>> {
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();

            let mut records = self
                .records
                .write()
                .map_err(|e| AdapterError::Backend(e.to_string()))?;
            records.insert(id.clone(), record.clone());

            Ok(InsertResult {
                generated_id: Value::String(id),
                record,
            })
        })
    }

    fn update(&self, id: Value, record: Value) -> BoxFuture<'_, AdapterResult<UpdateResult>> {
        Box::pin(async move {
            let key = record_key(&id);

            let mut records = self
                .records
                .write()
                .map_err(|e| AdapterError::Backend(e.to_string()))?;

            match records.get_mut(&key) {
                Some(stored) => {
                    *stored = record.clone();
                    Ok(UpdateResult { record })
                }
                None => Err(AdapterError::NotFound(key)),
            }
        })
    }
}

/// Identifier values may be strings or numbers; both key the store.
fn record_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

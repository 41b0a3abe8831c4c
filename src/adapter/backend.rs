//! Persistence adapter contract.

use futures_util::future::BoxFuture;
use serde_json::Value;

use super::errors::AdapterResult;

/// Outcome of an insert: the generated identifier and the stored record.
#[derive(Debug, Clone)]
pub struct InsertResult {
    /// Identifier generated by the backend
    pub generated_id: Value,
    /// The record as stored
    pub record: Value,
}

/// Outcome of an update: the stored record after the write.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// The record as stored
    pub record: Value,
}

/// Durable write primitive the document model calls and awaits.
///
/// Both operations are single-shot: one call, one asynchronous completion.
/// Implementations own retry and timeout policy; their errors reach `save`
/// callers unchanged.
pub trait PersistenceAdapter: Send + Sync {
    /// Inserts a new record, returning the generated identifier.
    fn insert(&self, record: Value) -> BoxFuture<'_, AdapterResult<InsertResult>>;

    /// Updates the record stored under `id`.
    fn update(&self, id: Value, record: Value) -> BoxFuture<'_, AdapterResult<UpdateResult>>;
}

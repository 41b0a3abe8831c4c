//! Persistence adapters.
//!
//! The document model treats durable storage as an external collaborator:
//! anything implementing [`PersistenceAdapter`] can back a model. The
//! in-memory [`MemoryAdapter`] is the reference implementation used by tests
//! and demos.

mod backend;
mod errors;
mod memory;

pub use backend::{InsertResult, PersistenceAdapter, UpdateResult};
pub use errors::{AdapterError, AdapterResult};
pub use memory::MemoryAdapter;

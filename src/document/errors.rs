//! # Document Errors
//!
//! Failures surfaced by document operations. Validation errors come from the
//! schema engine; adapter errors pass through from the persistence backend.

use thiserror::Error;

use crate::adapter::AdapterError;
use crate::schema::SchemaError;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document operation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Merge input was not a JSON object
    #[error("Merge input must be an object, got {0}")]
    NotAnObject(&'static str),

    /// Validation failure from the schema engine
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Persistence failure, passed through from the adapter unchanged
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// No private method registered under that name on this document
    #[error("No private method named `{0}` on this document")]
    UnknownMethod(String),
}

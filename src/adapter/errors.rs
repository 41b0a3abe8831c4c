//! # Adapter Errors
//!
//! Failures raised by persistence adapters. The document model propagates
//! these unchanged to `save` callers; retry and timeout policy live in the
//! adapter, never in the core.

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Adapter failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// No record stored under the given identifier
    #[error("No record stored under id {0}")]
    NotFound(String),

    /// Backend-defined failure, passed through unchanged
    #[error("{0}")]
    Backend(String),
}

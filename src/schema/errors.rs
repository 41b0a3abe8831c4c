//! # Schema Errors
//!
//! Validation errors raised by the validate/merge engine.
//!
//! Messages keep the wording callers match on: the offending field name
//! always appears in square brackets.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Enforced merge received fields not declared in the schema
    #[error("An extra field `[{}]` not defined in the schema was found.", .0.join(", "))]
    UnknownFields(Vec<String>),

    /// Strict merge left a required field without a value
    #[error("Value for [{0}] must be defined")]
    MissingField(String),

    /// A field value's runtime type disagrees with its declared type
    #[error("Value for [{field}] must be a {expected}")]
    TypeMismatch {
        /// Field path (e.g. "address.city")
        field: String,
        /// Declared type name
        expected: &'static str,
    },
}

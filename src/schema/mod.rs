//! Schema definition and validate/merge engine.
//!
//! # Design Principles
//!
//! - Field rules are immutable once a model is created
//! - Validation order is deterministic: unknown fields first, then types in
//!   declaration order, then required fields
//! - A failed merge never leaves partial writes behind

mod errors;
mod merge;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use merge::MergeOptions;
pub use types::{FieldRule, FieldType, SchemaDefinition};

pub(crate) use merge::json_type_name;

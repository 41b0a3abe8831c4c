//! docmodel - A strict, schema-bound document model with event notification
//!
//! Models are declared once (schema + options) in a [`model::ModelRegistry`]
//! and shared by every document created from them. Each document owns its
//! field values and listeners, validates incoming data through the model's
//! schema on `merge`, and persists through a pluggable
//! [`adapter::PersistenceAdapter`], emitting `change` and `save` events as
//! state transitions happen.

pub mod adapter;
pub mod document;
pub mod events;
pub mod model;
pub mod schema;

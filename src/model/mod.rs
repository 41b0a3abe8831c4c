//! Models and the model registry.
//!
//! # Design Principles
//!
//! - One model object per declared name; every document of a model holds a
//!   handle to the same underlying object
//! - The registry is explicit and adapter-injected, populated at startup and
//!   read thereafter
//! - Re-declaring a name replaces the registry entry without touching
//!   documents built from the previous model

mod model;
mod registry;

pub use model::{Model, ModelOptions};
pub use registry::ModelRegistry;

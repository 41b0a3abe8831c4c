//! The per-record document instance.

mod errors;
mod instance;

pub use errors::{DocumentError, DocumentResult};
pub use instance::{Document, Method, CHANGE_EVENT, SAVE_EVENT};

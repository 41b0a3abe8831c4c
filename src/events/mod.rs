//! Per-document event notification.
//!
//! # Design Principles
//!
//! - One channel per document; listener state is never shared
//! - Delivery is synchronous and in registration order
//! - Emission snapshots the listener sequence first, so listeners added
//!   during a pass are not invoked by it

mod channel;

pub use channel::{EventChannel, Listener};

//! # Event Channel
//!
//! Named-event publish/subscribe owned by a single document.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

/// A registered event listener.
///
/// Handles are `Arc`s so removal can match the exact registration: keep a
/// clone of the handle you passed to `on` and hand it back to `off`.
pub type Listener = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Ordered listener sequences keyed by event name.
#[derive(Default)]
pub struct EventChannel {
    listeners: HashMap<String, Vec<Listener>>,
}

impl EventChannel {
    /// Create a channel with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the sequence for `event`. Duplicate
    /// registrations of the same handle are kept and invoked once each.
    pub fn on(&mut self, event: &str, listener: Listener) {
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Removes the first registration matching `listener`. Removing a
    /// listener that was never registered is a no-op.
    pub fn off(&mut self, event: &str, listener: &Listener) {
        if let Some(seq) = self.listeners.get_mut(event) {
            if let Some(pos) = seq.iter().position(|l| Arc::ptr_eq(l, listener)) {
                seq.remove(pos);
            }
        }
    }

    /// Alias for [`EventChannel::off`].
    pub fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.off(event, listener);
    }

    /// Clears the sequence for `event`, or every sequence when `event` is
    /// `None`.
    pub fn remove_all_listeners(&mut self, event: Option<&str>) {
        match event {
            Some(name) => {
                self.listeners.remove(name);
            }
            None => self.listeners.clear(),
        }
    }

    /// Invokes every listener currently registered for `event`, in
    /// registration order, passing `args` to each. Returns the number of
    /// listeners invoked.
    pub fn emit(&self, event: &str, args: &[Value]) -> usize {
        // Snapshot-then-invoke: the sequence at emission start is the one
        // delivered to.
        let snapshot: Vec<Listener> = match self.listeners.get(event) {
            Some(seq) => seq.clone(),
            None => return 0,
        };

        for listener in &snapshot {
            listener(args);
        }

        snapshot.len()
    }

    /// Current ordered listener sequence for `event`.
    pub fn listeners(&self, event: &str) -> &[Listener] {
        self.listeners
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map(Vec::len).unwrap_or(0)
    }
}

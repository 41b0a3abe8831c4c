//! # Document Instance
//!
//! The per-record state container: field values, an instance-local method
//! table, and an event channel. Mutation goes through `merge` (validated,
//! emits `change`) or `set` (trusted escape hatch, silent). `save` hands the
//! serialized fields to the persistence adapter and emits `save` once the
//! write resolves.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::events::{EventChannel, Listener};
use crate::model::Model;
use crate::schema::{json_type_name, MergeOptions};

use super::errors::{DocumentError, DocumentResult};

/// Event emitted after every successful `merge`.
pub const CHANGE_EVENT: &str = "change";

/// Event emitted after every resolved `save`.
pub const SAVE_EVENT: &str = "save";

/// An instance-bound method. Receives the owning document as receiver plus
/// the call arguments.
pub type Method = Arc<dyn Fn(&mut Document, &[Value]) -> Value + Send + Sync>;

/// Built-in operation names `define_private` refuses to shadow.
const RESERVED_NAMES: &[&str] = &[
    "merge",
    "save",
    "set",
    "get",
    "document",
    "model",
    "define_private",
    "on",
    "off",
    "emit",
    "listeners",
    "remove_all_listeners",
];

/// A single schema-bound record.
///
/// Documents of the same model share the model object but own their fields,
/// methods and listeners independently; mutating one never affects another.
pub struct Document {
    model: Model,
    fields: Map<String, Value>,
    methods: HashMap<String, Method>,
    channel: EventChannel,
}

impl Document {
    /// Builds a document by merging `initial` into an empty field set, then
    /// filling declared defaults for fields still absent. Shared model
    /// methods are snapshotted here; later `Model::define` calls do not
    /// reach this instance.
    pub(crate) fn new(model: Model, initial: Value) -> DocumentResult<Self> {
        let incoming = into_object(initial)?;
        let options = MergeOptions {
            enforce: model.options().enforce,
            ..MergeOptions::default()
        };
        let mut fields = model
            .schema()
            .validate_merge(&Map::new(), &incoming, &options)?;

        for (name, rule) in model.schema().iter() {
            if let Some(default) = &rule.default {
                fields
                    .entry(name.to_string())
                    .or_insert_with(|| default.clone());
            }
        }

        let methods = model.method_snapshot();
        Ok(Self {
            model,
            fields,
            methods,
            channel: EventChannel::new(),
        })
    }

    /// Validated merge of `incoming` over the current fields.
    ///
    /// With `strict` the incoming object replaces the document outright and
    /// every required field must be present in it; without it fields absent
    /// from `incoming` keep their current values.
    ///
    /// On success the result becomes the document's fields and `change` is
    /// fully delivered before control returns. On failure the fields are
    /// untouched and no event fires.
    pub fn merge(&mut self, incoming: Value, strict: bool) -> DocumentResult<&mut Self> {
        let incoming = into_object(incoming)?;
        let options = MergeOptions {
            enforce: self.model.options().enforce,
            strict,
            deep: true,
        };

        let current = if strict { Map::new() } else { self.fields.clone() };
        let merged = self
            .model
            .schema()
            .validate_merge(&current, &incoming, &options)?;

        self.fields = merged;
        self.channel.emit(CHANGE_EVENT, &[]);
        Ok(self)
    }

    /// Trusted in-process assignment. Bypasses validation and emits nothing.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Current value of `field`, if set.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// This instance's own field map. Distinct instances never hand out the
    /// same map, even when their values are equal.
    pub fn document(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The shared model, by reference. Sibling documents return the
    /// identical model (see [`Model::same_model`]).
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The persistence identifier, when populated.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(self.model.options().primary_key.as_str())
    }

    /// Persists the current fields through the model's adapter.
    ///
    /// Without an identifier this inserts and merges the generated id back
    /// into the fields (no validation: the id is adapter-generated); with
    /// one it updates the stored record in place. `save` is emitted after
    /// the adapter's write resolves and before this returns. The returned
    /// reference is this same instance, so callers can keep mutating and
    /// re-saving it.
    ///
    /// An adapter failure leaves the fields untouched, fires no event, and
    /// reaches the caller unchanged.
    pub async fn save(&mut self) -> DocumentResult<&mut Self> {
        let record = Value::Object(self.fields.clone());
        let adapter = self.model.adapter();
        let primary_key = self.model.options().primary_key.clone();

        match self.fields.get(&primary_key).cloned() {
            None => {
                let inserted = adapter.insert(record).await?;
                self.fields.insert(primary_key, inserted.generated_id);
            }
            Some(id) => {
                adapter.update(id, record).await?;
            }
        }

        self.channel.emit(SAVE_EVENT, &[]);
        Ok(self)
    }

    /// Attaches a method to this document only.
    ///
    /// Sibling documents and documents created later from the same model
    /// never see it. Reserved operation names are silently skipped;
    /// re-defining an existing private method overwrites it.
    pub fn define_private(&mut self, name: impl Into<String>, method: Method) {
        let name = name.into();
        if RESERVED_NAMES.contains(&name.as_str()) {
            return;
        }
        self.methods.insert(name, method);
    }

    /// Whether a private method is registered under `name`.
    pub fn has_private(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Invokes the private method under `name` with this document bound as
    /// the receiver.
    pub fn call_private(&mut self, name: &str, args: &[Value]) -> DocumentResult<Value> {
        let method = self
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| DocumentError::UnknownMethod(name.to_string()))?;
        Ok(method(self, args))
    }

    /// Registers a listener for `event`. See [`EventChannel::on`].
    pub fn on(&mut self, event: &str, listener: Listener) {
        self.channel.on(event, listener);
    }

    /// Removes the first matching registration of `listener` for `event`.
    pub fn off(&mut self, event: &str, listener: &Listener) {
        self.channel.off(event, listener);
    }

    /// Alias for [`Document::off`].
    pub fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.channel.off(event, listener);
    }

    /// Clears listeners for `event`, or all listeners when `None`.
    pub fn remove_all_listeners(&mut self, event: Option<&str>) {
        self.channel.remove_all_listeners(event);
    }

    /// Emits `event` to this document's listeners. Returns the number
    /// invoked.
    pub fn emit(&self, event: &str, args: &[Value]) -> usize {
        self.channel.emit(event, args)
    }

    /// Current ordered listener sequence for `event`.
    pub fn listeners(&self, event: &str) -> &[Listener] {
        self.channel.listeners(event)
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.channel.listener_count(event)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("model", &self.model.name())
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

fn into_object(value: Value) -> DocumentResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::NotAnObject(json_type_name(&other))),
    }
}

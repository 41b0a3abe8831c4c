//! # Model
//!
//! Shared, named schema + method template documents are created from.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::adapter::PersistenceAdapter;
use crate::document::{Document, DocumentResult, Method};
use crate::schema::SchemaDefinition;

/// Behavior switches for a model.
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Reject undeclared fields and type mismatches on every merge
    pub enforce: bool,
    /// Field holding the persistence identifier
    pub primary_key: String,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            enforce: false,
            primary_key: "id".to_string(),
        }
    }
}

impl ModelOptions {
    /// Options with schema enforcement turned on.
    pub fn enforced() -> Self {
        Self {
            enforce: true,
            ..Self::default()
        }
    }
}

struct ModelInner {
    name: String,
    schema: SchemaDefinition,
    options: ModelOptions,
    adapter: Arc<dyn PersistenceAdapter>,
    /// Shared methods, snapshotted by documents at construction time.
    methods: RwLock<HashMap<String, Method>>,
}

/// A shared model handle.
///
/// Cloning clones the handle; every document created from a model references
/// the same underlying object, observable through [`Model::same_model`].
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    pub(crate) fn new(
        name: impl Into<String>,
        schema: SchemaDefinition,
        options: ModelOptions,
        adapter: Arc<dyn PersistenceAdapter>,
    ) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                name: name.into(),
                schema,
                options,
                adapter,
                methods: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The declared model name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The field rules documents of this model validate against.
    pub fn schema(&self) -> &SchemaDefinition {
        &self.inner.schema
    }

    /// The model's behavior switches.
    pub fn options(&self) -> &ModelOptions {
        &self.inner.options
    }

    pub(crate) fn adapter(&self) -> Arc<dyn PersistenceAdapter> {
        Arc::clone(&self.inner.adapter)
    }

    /// True when both handles refer to the same underlying model object.
    pub fn same_model(a: &Model, b: &Model) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Attaches a shared method under `name`.
    ///
    /// Documents created afterwards snapshot it into their own method table;
    /// documents created earlier are unaffected.
    pub fn define(&self, name: impl Into<String>, method: Method) {
        if let Ok(mut methods) = self.inner.methods.write() {
            methods.insert(name.into(), method);
        }
    }

    pub(crate) fn method_snapshot(&self) -> HashMap<String, Method> {
        self.inner
            .methods
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Constructs a document of this model.
    ///
    /// `initial` is merged into an empty field set (enforced when the model
    /// says so), then declared defaults fill fields still absent.
    pub fn create(&self, initial: Value) -> DocumentResult<Document> {
        Document::new(self.clone(), initial)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

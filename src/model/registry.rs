//! # Model Registry
//!
//! Explicit process-wide mapping from model name to shared model. Populated
//! at startup, read by everything that constructs documents. Never an
//! ambient global: callers hold the registry and pass it where needed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adapter::PersistenceAdapter;
use crate::schema::SchemaDefinition;

use super::model::{Model, ModelOptions};

/// Name → model mapping backed by an injected persistence adapter.
pub struct ModelRegistry {
    adapter: Arc<dyn PersistenceAdapter>,
    models: RwLock<HashMap<String, Model>>,
}

impl ModelRegistry {
    /// Create a registry whose models persist through `adapter`.
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self {
            adapter,
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Declares (or re-declares) a model under `name`.
    ///
    /// Re-declaring replaces the registry entry; documents built from the
    /// previous model keep their reference to it.
    pub fn create_model(
        &self,
        name: &str,
        schema: SchemaDefinition,
        options: ModelOptions,
    ) -> Model {
        let model = Model::new(name, schema, options, Arc::clone(&self.adapter));
        if let Ok(mut models) = self.models.write() {
            models.insert(name.to_string(), model.clone());
        }
        model
    }

    /// Looks up the model currently declared under `name`.
    pub fn get(&self, name: &str) -> Option<Model> {
        self.models.read().ok().and_then(|m| m.get(name).cloned())
    }

    /// Number of declared models.
    pub fn model_count(&self) -> usize {
        self.models.read().map(|m| m.len()).unwrap_or(0)
    }
}

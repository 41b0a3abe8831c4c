//! Document Invariant Tests
//!
//! Properties every document of a model must uphold:
//! - Sibling documents share the model object but never field or listener state
//! - Private methods stay on the instance they were defined on
//! - Enforced merges reject unknown fields, wrong types and (strictly)
//!   missing required fields, without partial writes
//! - `change` fires exactly once per successful merge, before merge returns

use std::sync::{Arc, Mutex};

use docmodel::adapter::MemoryAdapter;
use docmodel::document::{Document, DocumentError, CHANGE_EVENT};
use docmodel::events::Listener;
use docmodel::model::{Model, ModelOptions, ModelRegistry};
use docmodel::schema::{FieldRule, SchemaDefinition, SchemaError};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_registry() -> ModelRegistry {
    ModelRegistry::new(Arc::new(MemoryAdapter::new()))
}

fn cat_schema() -> SchemaDefinition {
    SchemaDefinition::new()
        .field("id", FieldRule::required_number())
        .field("name", FieldRule::required_string())
}

fn counting_listener(count: &Arc<Mutex<u32>>) -> Listener {
    let count = Arc::clone(count);
    Arc::new(move |_args: &[Value]| *count.lock().unwrap() += 1)
}

// =============================================================================
// Identity Tests
// =============================================================================

/// Two documents of one model hand out distinct field maps even when the
/// values are equal.
#[test]
fn test_get_document_returns_distinct_objects() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());

    let catou = cat.create(json!({"name": "Catou"})).unwrap();
    let minou = cat.create(json!({"name": "Catou"})).unwrap();

    assert_eq!(catou.document(), minou.document());
    assert!(!std::ptr::eq(catou.document(), minou.document()));
}

/// Every document of a model returns the identical shared model.
#[test]
fn test_get_model_is_shared_by_all_instances() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());

    let catou = cat.create(json!({"name": "Catou"})).unwrap();
    let minou = cat.create(json!({"name": "Minou"})).unwrap();

    assert!(Model::same_model(catou.model(), minou.model()));
}

/// Re-declaring a model name replaces the registry entry but existing
/// documents keep the model they were built from.
#[test]
fn test_redeclared_model_does_not_reach_existing_documents() {
    let registry = setup_registry();
    let first = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let catou = first.create(json!({"name": "Catou"})).unwrap();

    let second = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let minou = second.create(json!({"id": 1, "name": "Minou"})).unwrap();

    assert!(Model::same_model(catou.model(), &first));
    assert!(Model::same_model(minou.model(), &second));
    assert!(!Model::same_model(catou.model(), minou.model()));
}

/// Mutating one document never affects a sibling.
#[test]
fn test_sibling_fields_are_independent() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());

    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();
    let minou = cat.create(json!({"name": "Minou"})).unwrap();

    catou.merge(json!({"name": "CatouBis"}), false).unwrap();
    catou.set("mood", json!("hungry"));

    assert_eq!(minou.get("name"), Some(&json!("Minou")));
    assert_eq!(minou.get("mood"), None);
}

// =============================================================================
// Private Method Tests
// =============================================================================

/// A private method is callable on the document it was defined on.
#[test]
fn test_define_private_saves_a_method() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();

    catou.define_private(
        "helloDoc",
        Arc::new(|doc: &mut Document, _args: &[Value]| {
            let name = doc.get("name").and_then(Value::as_str).unwrap_or("");
            Value::String(format!("hello, my name is {}", name))
        }),
    );

    assert_eq!(
        catou.call_private("helloDoc", &[]).unwrap(),
        json!("hello, my name is Catou")
    );
}

/// Defining on one document adds nothing to a pre-existing sibling.
#[test]
fn test_private_method_not_visible_on_sibling() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();
    let mut minou = cat.create(json!({"name": "Minou"})).unwrap();

    catou.define_private(
        "helloDoc",
        Arc::new(|_: &mut Document, _: &[Value]| Value::Null),
    );

    assert!(!minou.has_private("helloDoc"));
    assert_eq!(
        minou.call_private("helloDoc", &[]).unwrap_err(),
        DocumentError::UnknownMethod("helloDoc".into())
    );
}

/// Nor to a document created afterwards, even with identical initial data.
#[test]
fn test_private_method_not_inherited_by_new_documents() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();

    catou.define_private(
        "helloDoc",
        Arc::new(|_: &mut Document, _: &[Value]| Value::Null),
    );

    let later = cat.create(json!({"name": "Catou"})).unwrap();
    assert!(!later.has_private("helloDoc"));
}

// =============================================================================
// Merge Tests
// =============================================================================

/// An enforced merge replaces every field given.
#[test]
fn test_enforced_merge_replaces_all_fields() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    catou.merge(json!({"id": 2, "name": "CatouBis"}), false).unwrap();
    assert_eq!(catou.get("id"), Some(&json!(2)));
    assert_eq!(catou.get("name"), Some(&json!("CatouBis")));
}

/// A default (non-strict) merge may omit fields already present, even with
/// enforcement on.
#[test]
fn test_enforced_merge_keeps_omitted_fields() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    catou.merge(json!({"name": "CatouTer"}), false).unwrap();
    assert_eq!(catou.get("id"), Some(&json!(1)));
    assert_eq!(catou.get("name"), Some(&json!("CatouTer")));
}

/// An enforced merge rejects extra fields, naming exactly the offenders, and
/// leaves prior state unchanged.
#[test]
fn test_enforced_merge_rejects_extra_field() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    let err = catou
        .merge(json!({"id": 2, "name": "CatouBis", "extraField": 3}), false)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An extra field `[extraField]` not defined in the schema was found."
    );

    assert_eq!(catou.get("id"), Some(&json!(1)));
    assert_eq!(catou.get("name"), Some(&json!("Catou")));
    assert_eq!(catou.get("extraField"), None);
}

/// A strict merge omitting a required field names that field.
#[test]
fn test_strict_merge_rejects_missing_required_field() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    let err = catou.merge(json!({"name": "catoubis"}), true).unwrap_err();
    assert_eq!(err.to_string(), "Value for [id] must be defined");
    assert_eq!(catou.get("id"), Some(&json!(1)));
    assert_eq!(catou.get("name"), Some(&json!("Catou")));
}

/// An enforced merge with a wrong-typed value names the field and its
/// expected type.
#[test]
fn test_enforced_merge_rejects_wrong_type() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::enforced());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    let err = catou
        .merge(json!({"id": "nonValidValue", "name": "CatouBis"}), false)
        .unwrap_err();
    assert_eq!(err.to_string(), "Value for [id] must be a Number");
    assert_eq!(
        err,
        DocumentError::Schema(SchemaError::TypeMismatch {
            field: "id".into(),
            expected: "Number"
        })
    );
}

/// `change` is delivered exactly once per merge, to listeners registered
/// before the call, with the new fields already written.
#[test]
fn test_merge_emits_change_exactly_once() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"id": 1, "name": "Catou"})).unwrap();

    let count = Arc::new(Mutex::new(0u32));
    catou.on(CHANGE_EVENT, counting_listener(&count));

    catou.merge(json!({"name": "CatouBis"}), false).unwrap();
    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(catou.get("name"), Some(&json!("CatouBis")));

    catou.merge(json!({"name": "CatouTer"}), false).unwrap();
    assert_eq!(*count.lock().unwrap(), 2);
}

// =============================================================================
// Listener Tests
// =============================================================================

/// A listener registered with `on` runs when its event is emitted.
#[test]
fn test_on_executes_listener_on_emit() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();

    let count = Arc::new(Mutex::new(0u32));
    catou.on("testEvent", counting_listener(&count));
    assert_eq!(catou.listeners("testEvent").len(), 1);

    let delivered = catou.emit("testEvent", &[]);
    assert_eq!(delivered, 1);
    assert_eq!(*count.lock().unwrap(), 1);
}

/// `off` removes exactly one matching registration; the removed listener is
/// not invoked again.
#[test]
fn test_off_removes_one_listener() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();

    let count = Arc::new(Mutex::new(0u32));
    let listener = counting_listener(&count);
    catou.on("testEvent", Arc::clone(&listener));
    assert_eq!(catou.listeners("testEvent").len(), 1);

    catou.off("testEvent", &listener);
    assert_eq!(catou.listeners("testEvent").len(), 0);

    catou.emit("testEvent", &[]);
    assert_eq!(*count.lock().unwrap(), 0);
}

/// Listener state lives on the instance, not the model.
#[test]
fn test_listeners_are_per_instance() {
    let registry = setup_registry();
    let cat = registry.create_model("Cat", cat_schema(), ModelOptions::default());
    let mut catou = cat.create(json!({"name": "Catou"})).unwrap();
    let minou = cat.create(json!({"name": "Minou"})).unwrap();

    let count = Arc::new(Mutex::new(0u32));
    catou.on(CHANGE_EVENT, counting_listener(&count));

    assert_eq!(catou.listener_count(CHANGE_EVENT), 1);
    assert_eq!(minou.listener_count(CHANGE_EVENT), 0);
}

//! Validate/merge engine.
//!
//! Merge semantics:
//! - Permissive mode shallow-merges incoming over current, recursing into
//!   nested object values unless `deep` is disabled; unknown fields pass
//!   through unvalidated.
//! - Enforced mode rejects undeclared fields (all offenders reported in one
//!   error), then checks types in schema declaration order, then (strict
//!   only) requires every required field in the result.
//! - The first violation aborts the pass. The engine builds a fresh merged
//!   map and never touches its inputs, so a failed merge leaves the caller's
//!   state exactly as it was.

use chrono::DateTime;
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldType, SchemaDefinition};

/// Options controlling a single validate/merge pass.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Reject undeclared fields and type mismatches
    pub enforce: bool,
    /// Additionally require every required field in the merged result
    pub strict: bool,
    /// Recurse into nested object values instead of replacing them wholesale
    pub deep: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            enforce: false,
            strict: false,
            deep: true,
        }
    }
}

impl SchemaDefinition {
    /// Merges `incoming` over `current` and validates the result against
    /// this schema.
    ///
    /// Returns the merged field map. The inputs are left untouched; on
    /// failure the caller's `current` holds no partial writes.
    pub fn validate_merge(
        &self,
        current: &Map<String, Value>,
        incoming: &Map<String, Value>,
        options: &MergeOptions,
    ) -> SchemaResult<Map<String, Value>> {
        let merged = merge_maps(current, incoming, options.deep);

        if options.enforce {
            self.check_unknown(&merged)?;
            self.check_types(&merged, options.strict)?;
            if options.strict {
                self.check_required(&merged)?;
            }
        }

        Ok(merged)
    }

    fn check_unknown(&self, merged: &Map<String, Value>) -> SchemaResult<()> {
        let unknown: Vec<String> = merged
            .keys()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::UnknownFields(unknown))
        }
    }

    fn check_types(&self, merged: &Map<String, Value>, strict: bool) -> SchemaResult<()> {
        for (name, rule) in self.iter() {
            if let Some(value) = merged.get(name) {
                check_value(name, value, &rule.field_type, strict)?;
            }
        }
        Ok(())
    }

    fn check_required(&self, merged: &Map<String, Value>) -> SchemaResult<()> {
        for (name, rule) in self.iter() {
            if rule.required && !merged.contains_key(name) {
                return Err(SchemaError::MissingField(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Merges `incoming` over a clone of `current`. With `deep`, object values
/// present on both sides are merged key by key; otherwise incoming values
/// replace wholesale.
fn merge_maps(
    current: &Map<String, Value>,
    incoming: &Map<String, Value>,
    deep: bool,
) -> Map<String, Value> {
    let mut merged = current.clone();

    for (key, value) in incoming {
        if deep {
            if let (Some(Value::Object(existing)), Value::Object(update)) =
                (merged.get_mut(key), value)
            {
                let combined = merge_maps(existing, update, deep);
                *existing = combined;
                continue;
            }
        }
        merged.insert(key.clone(), value.clone());
    }

    merged
}

/// Validates a value against a declared field type.
fn check_value(
    field: &str,
    value: &Value,
    expected: &FieldType,
    strict: bool,
) -> SchemaResult<()> {
    match expected {
        FieldType::String => {
            if !value.is_string() {
                return Err(type_mismatch(field, expected));
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                return Err(type_mismatch(field, expected));
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(type_mismatch(field, expected));
            }
        }
        FieldType::Date => {
            let parses = value
                .as_str()
                .map(|s| DateTime::parse_from_rfc3339(s).is_ok())
                .unwrap_or(false);
            if !parses {
                return Err(type_mismatch(field, expected));
            }
        }
        FieldType::Object { fields } => {
            let obj = value
                .as_object()
                .ok_or_else(|| type_mismatch(field, expected))?;
            check_nested_object(field, obj, fields, strict)?;
        }
        FieldType::Array { element_type } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_mismatch(field, expected))?;
            for (i, elem) in arr.iter().enumerate() {
                let elem_path = format!("{}[{}]", field, i);
                check_value(&elem_path, elem, element_type, strict)?;
            }
        }
    }

    Ok(())
}

/// Validates a nested object value: undeclared keys and element types follow
/// the same rules as the top level, required keys only under strict.
fn check_nested_object(
    path: &str,
    obj: &Map<String, Value>,
    fields: &SchemaDefinition,
    strict: bool,
) -> SchemaResult<()> {
    let unknown: Vec<String> = obj
        .keys()
        .filter(|key| !fields.contains(key))
        .map(|key| join_path(path, key))
        .collect();
    if !unknown.is_empty() {
        return Err(SchemaError::UnknownFields(unknown));
    }

    for (name, rule) in fields.iter() {
        let field_path = join_path(path, name);
        match obj.get(name) {
            Some(value) => check_value(&field_path, value, &rule.field_type, strict)?,
            None => {
                if strict && rule.required {
                    return Err(SchemaError::MissingField(field_path));
                }
            }
        }
    }

    Ok(())
}

/// Returns the JSON type name for error and diagnostic messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    format!("{}.{}", prefix, field)
}

fn type_mismatch(field: &str, expected: &FieldType) -> SchemaError {
    SchemaError::TypeMismatch {
        field: field.to_string(),
        expected: expected.type_name(),
    }
}

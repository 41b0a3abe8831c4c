//! Field and schema type definitions.
//!
//! Supported field types:
//! - String: UTF-8 string
//! - Number: any JSON number
//! - Bool: boolean
//! - Date: RFC 3339 timestamp string
//! - Object: nested object with its own field rules
//! - Array: homogeneous array with an element type

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported field types, switched on by tag during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Any JSON number
    Number,
    /// Boolean
    Bool,
    /// RFC 3339 timestamp, carried as a string value
    Date,
    /// Nested object with its own field rules
    Object {
        /// Nested field declarations
        fields: SchemaDefinition,
    },
    /// Homogeneous array with a single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Bool => "Boolean",
            FieldType::Date => "Date",
            FieldType::Object { .. } => "Object",
            FieldType::Array { .. } => "Array",
        }
    }
}

/// A single field rule: type, presence requirement and optional default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether a strict merge requires the field to be present
    pub required: bool,
    /// Value filled in at document construction when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldRule {
    /// Create a rule with no default.
    pub fn new(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            required,
            default: None,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::new(FieldType::String, true)
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self::new(FieldType::String, false)
    }

    /// Create a required number field
    pub fn required_number() -> Self {
        Self::new(FieldType::Number, true)
    }

    /// Create an optional number field
    pub fn optional_number() -> Self {
        Self::new(FieldType::Number, false)
    }

    /// Create a required bool field
    pub fn required_bool() -> Self {
        Self::new(FieldType::Bool, true)
    }

    /// Create an optional bool field
    pub fn optional_bool() -> Self {
        Self::new(FieldType::Bool, false)
    }

    /// Create a required date field
    pub fn required_date() -> Self {
        Self::new(FieldType::Date, true)
    }

    /// Create an optional date field
    pub fn optional_date() -> Self {
        Self::new(FieldType::Date, false)
    }

    /// Create a required object field
    pub fn required_object(fields: SchemaDefinition) -> Self {
        Self::new(FieldType::Object { fields }, true)
    }

    /// Create an optional object field
    pub fn optional_object(fields: SchemaDefinition) -> Self {
        Self::new(FieldType::Object { fields }, false)
    }

    /// Create a required array field
    pub fn required_array(element_type: FieldType) -> Self {
        Self::new(
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            true,
        )
    }

    /// Create an optional array field
    pub fn optional_array(element_type: FieldType) -> Self {
        Self::new(
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            false,
        )
    }

    /// Attach a default value, applied at document construction.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Ordered mapping from field name to rule.
///
/// Declaration order drives the type-check order during enforced merges, so
/// the same invalid document always reports the same violation first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    fields: Vec<(String, FieldRule)>,
}

impl SchemaDefinition {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Re-declaring a name replaces the rule in place,
    /// keeping the original position.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    /// Returns the rule declared for `name`, if any.
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

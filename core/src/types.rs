//! Schema type definitions for tagged-union modeling.
//!
//! A union is described by a set of [`VariantSchema`]s, each identified by a
//! literal tag value and carrying an ordered list of [`FieldSchema`]s. The
//! types serialize with [`serde`] in the camelCase form used by persisted
//! registry documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Version of the registry document contract (semver).
pub const SCHEMA_CONTRACT_VERSION: &str = "1.0.0";

/// Name of the discriminant field when none is configured.
pub const DEFAULT_TAG_FIELD: &str = "tag";

/// Primitive type constraint of a field.
///
/// Each type is distinct; there is no coercion between them. The single
/// exception is numeric widening: an integer satisfies a [`Float`](FieldType::Float)
/// field.
///
/// # Examples
///
/// ```
/// use union_schema_core::{FieldType, Value};
///
/// assert!(FieldType::Int.accepts(&Value::Int(1)));
/// assert!(FieldType::Float.accepts(&Value::Int(1)));
/// assert!(!FieldType::Int.accepts(&Value::Float(1.0)));
/// assert!(!FieldType::Bool.accepts(&Value::from("yes")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Signed 64-bit integer.
    #[serde(alias = "integer")]
    Int,
    /// Boolean.
    #[serde(alias = "boolean")]
    Bool,
    /// UTF-8 string.
    #[serde(alias = "str")]
    String,
    /// 64-bit float; also accepts integers.
    #[serde(alias = "number")]
    Float,
}

impl FieldType {
    /// Returns `true` if `value` satisfies this type constraint.
    ///
    /// `null` is never accepted here; the decoder handles it before type
    /// checking.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldType::Int, Value::Int(_))
                | (FieldType::Bool, Value::Bool(_))
                | (FieldType::String, Value::String(_))
                | (FieldType::Float, Value::Float(_) | Value::Int(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Float => "float",
        };
        f.write_str(name)
    }
}

/// Schema for one data field of a variant.
///
/// # Examples
///
/// ```
/// use union_schema_core::{FieldSchema, FieldType};
///
/// let count = FieldSchema::required("count", FieldType::Int);
/// assert!(count.required);
///
/// let note = FieldSchema::optional("note", FieldType::String)
///     .with_description("Free-form annotation");
/// assert!(!note.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Field name; unique within its variant.
    pub name: String,
    /// Primitive type constraint.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present.
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl FieldSchema {
    /// Creates a required field.
    pub fn required(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
            description: None,
        }
    }

    /// Creates an optional field.
    pub fn optional(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// Schema for one member of a tagged union.
///
/// The tag field itself is implicit: it is named by the owning
/// [`UnionRegistry`](crate::UnionRegistry) and must not appear in `fields`.
///
/// # Examples
///
/// ```
/// use union_schema_core::{FieldSchema, FieldType, VariantSchema};
///
/// let variant = VariantSchema::new("Variant2")
///     .with_field(FieldSchema::required("field1", FieldType::Int))
///     .with_field(FieldSchema::required("field2", FieldType::Bool));
///
/// assert_eq!(variant.display_name(), "Variant2");
/// assert_eq!(variant.field_names(), vec!["field1", "field2"]);
/// assert!(variant.find_field("field2").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSchema {
    /// Literal discriminant value identifying this variant.
    pub tag_value: String,
    /// Human-readable variant name (may be empty).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Data fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariantSchema {
    /// Creates a variant with no fields.
    pub fn new(tag_value: &str) -> Self {
        Self {
            tag_value: tag_value.to_string(),
            name: String::new(),
            fields: Vec::new(),
            description: None,
        }
    }

    /// Sets the human-readable name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Appends a field.
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Finds a declared field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Gets all field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the variant name, falling back to the tag value.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.tag_value
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_accepts_integral_values() {
        assert!(FieldType::Float.accepts(&Value::Float(0.5)));
        assert!(FieldType::Float.accepts(&Value::Int(2)));
        assert!(!FieldType::Float.accepts(&Value::from("2")));
    }

    #[test]
    fn test_no_type_accepts_null() {
        for ty in [
            FieldType::Int,
            FieldType::Bool,
            FieldType::String,
            FieldType::Float,
        ] {
            assert!(!ty.accepts(&Value::Null));
        }
    }

    #[test]
    fn test_field_schema_serde_form() {
        let field = FieldSchema::required("f1", FieldType::Int);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "f1", "type": "int", "required": true})
        );
    }

    #[test]
    fn test_field_schema_required_defaults_to_true() {
        let field: FieldSchema = serde_json::from_str(r#"{"name": "n", "type": "integer"}"#).unwrap();
        assert!(field.required);
        assert_eq!(field.field_type, FieldType::Int);
    }

    #[test]
    fn test_variant_schema_deserializes_camel_case() {
        let json = r#"{
            "tagValue": "Variant1",
            "name": "SampleVariant1",
            "fields": [
                {"name": "f1", "type": "int", "required": true},
                {"name": "f2", "type": "int", "required": false}
            ]
        }"#;
        let variant: VariantSchema = serde_json::from_str(json).unwrap();
        assert_eq!(variant.tag_value, "Variant1");
        assert_eq!(variant.display_name(), "SampleVariant1");
        assert_eq!(variant.field_names(), vec!["f1", "f2"]);
        assert!(!variant.fields[1].required);
    }
}

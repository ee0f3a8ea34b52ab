//! Record decoding and validation.
//!
//! Decoding resolves a record's variant from its tag field and then checks
//! it against that variant's schema. Tag problems abort immediately, since
//! without a variant there is nothing to check fields against. Field
//! problems are accumulated so a single pass reports all of them, in a
//! deterministic order:
//!
//! 1. missing/mismatched fields, in the variant's declaration order;
//! 2. unexpected fields, in the record's order.
//!
//! Decoding is all-or-nothing: any error means no instance.
//!
//! # Examples
//!
//! ```
//! use union_schema_core::*;
//!
//! let registry = UnionRegistry::builder()
//!     .variant(
//!         VariantSchema::new("Variant2")
//!             .with_field(FieldSchema::required("field1", FieldType::Int))
//!             .with_field(FieldSchema::required("field2", FieldType::Bool)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let record = record_from_json(&serde_json::json!({
//!     "tag": "Variant2", "field1": 1, "field2": "yes"
//! })).unwrap();
//!
//! let errors = decode(&record, &registry).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::type_mismatch("field2", FieldType::Bool, ValueKind::String)]
//! );
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FieldType, TypedInstance, UnionRegistry, UntypedRecord, ValidationError, Value};

/// Policy for record fields the variant does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Report each one as an unexpected-field error (the default).
    #[default]
    Reject,
    /// Drop them silently; they never reach the instance.
    Ignore,
}

/// Decoder configuration.
///
/// # Examples
///
/// ```
/// use union_schema_core::{DecodeOptions, UnknownFields};
///
/// assert_eq!(DecodeOptions::default().unknown_fields, UnknownFields::Reject);
/// assert_eq!(DecodeOptions::permissive().unknown_fields, UnknownFields::Ignore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

impl DecodeOptions {
    /// Strict decoding: unexpected fields are errors.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient decoding: unexpected fields are ignored.
    pub fn permissive() -> Self {
        Self {
            unknown_fields: UnknownFields::Ignore,
        }
    }
}

/// Decodes `record` against `registry` in strict mode.
///
/// # Errors
///
/// Returns every [`ValidationError`] found; see the module docs for the
/// ordering.
pub fn decode(
    record: &UntypedRecord,
    registry: &UnionRegistry,
) -> Result<TypedInstance, Vec<ValidationError>> {
    decode_with(record, registry, &DecodeOptions::default())
}

/// Decodes `record` against `registry` with explicit options.
///
/// A `null` value fails a required field like an absent one. An optional
/// field holding `null` is kept as [`Value::Null`] so the record encodes
/// back unchanged.
///
/// # Errors
///
/// Returns every [`ValidationError`] found; see the module docs for the
/// ordering.
pub fn decode_with(
    record: &UntypedRecord,
    registry: &UnionRegistry,
    options: &DecodeOptions,
) -> Result<TypedInstance, Vec<ValidationError>> {
    let tag_field = registry.tag_field();

    let tag = match record.get(tag_field) {
        None | Some(Value::Null) => {
            debug!(tag_field, "Record has no tag");
            return Err(vec![ValidationError::missing_tag(tag_field)]);
        }
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            debug!(tag_field, actual = %other.kind(), "Record tag is not a string");
            return Err(vec![ValidationError::type_mismatch(
                tag_field,
                FieldType::String,
                other.kind(),
            )]);
        }
    };

    let Ok(variant) = registry.lookup(tag) else {
        debug!(tag, "Record has unknown tag");
        return Err(vec![ValidationError::unknown_tag(tag_field, tag)]);
    };

    let mut errors = Vec::new();
    let mut fields = IndexMap::with_capacity(variant.fields.len());

    for field in &variant.fields {
        match record.get(&field.name) {
            None | Some(Value::Null) if field.required => {
                errors.push(ValidationError::missing_field(&field.name));
            }
            None => {}
            Some(Value::Null) => {
                fields.insert(field.name.clone(), Value::Null);
            }
            Some(value) if field.field_type.accepts(value) => {
                fields.insert(field.name.clone(), value.clone());
            }
            Some(value) => {
                errors.push(ValidationError::type_mismatch(
                    &field.name,
                    field.field_type,
                    value.kind(),
                ));
            }
        }
    }

    if options.unknown_fields == UnknownFields::Reject {
        for key in record.keys() {
            if key != tag_field && variant.find_field(key).is_none() {
                errors.push(ValidationError::unexpected_field(key));
            }
        }
    }

    if !errors.is_empty() {
        debug!(tag, errors = errors.len(), "Record failed validation");
        return Err(errors);
    }

    debug!(tag, fields = fields.len(), "Decoded record");
    Ok(TypedInstance::new(tag.to_string(), fields))
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, FieldSchema, ValueKind, VariantSchema};

    use super::*;

    fn registry() -> UnionRegistry {
        UnionRegistry::builder()
            .variant(
                VariantSchema::new("Event")
                    .with_field(FieldSchema::required("id", FieldType::Int))
                    .with_field(FieldSchema::required("name", FieldType::String))
                    .with_field(FieldSchema::optional("score", FieldType::Float))
                    .with_field(FieldSchema::optional("urgent", FieldType::Bool)),
            )
            .build()
            .unwrap()
    }

    fn record(json: serde_json::Value) -> UntypedRecord {
        crate::record_from_json(&json).unwrap()
    }

    #[test]
    fn test_decode_missing_tag() {
        let errors = decode(&record(serde_json::json!({"id": 1})), &registry()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::missing_tag("tag")]);
    }

    #[test]
    fn test_decode_null_tag_is_missing() {
        let errors = decode(&record(serde_json::json!({"tag": null})), &registry()).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::MissingTag);
    }

    #[test]
    fn test_decode_non_string_tag() {
        let errors = decode(&record(serde_json::json!({"tag": 7})), &registry()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::type_mismatch(
                "tag",
                FieldType::String,
                ValueKind::Int
            )]
        );
    }

    #[test]
    fn test_decode_unknown_tag_aborts_before_field_checks() {
        let errors = decode(
            &record(serde_json::json!({"tag": "Nope", "junk": true})),
            &registry(),
        )
        .unwrap_err();
        assert_eq!(errors, vec![ValidationError::unknown_tag("tag", "Nope")]);
    }

    #[test]
    fn test_decode_skips_absent_optional_fields() {
        let instance = decode(
            &record(serde_json::json!({"tag": "Event", "id": 1, "name": "a"})),
            &registry(),
        )
        .unwrap();
        assert_eq!(instance.fields().len(), 2);
        assert!(!instance.contains("score"));
    }

    #[test]
    fn test_decode_null_optional_field_is_kept() {
        let instance = decode(
            &record(serde_json::json!({"tag": "Event", "id": 1, "name": "a", "urgent": null})),
            &registry(),
        )
        .unwrap();
        assert_eq!(instance.get("urgent"), Some(&Value::Null));
        assert_eq!(instance.bool("urgent"), None);
        assert!(!instance.contains("score"));
    }

    #[test]
    fn test_decode_null_required_field_is_missing() {
        let errors = decode(
            &record(serde_json::json!({"tag": "Event", "id": null, "name": "a"})),
            &registry(),
        )
        .unwrap_err();
        assert_eq!(errors, vec![ValidationError::missing_field("id")]);
    }

    #[test]
    fn test_decode_integral_value_satisfies_float_unchanged() {
        let instance = decode(
            &record(serde_json::json!({"tag": "Event", "id": 1, "name": "a", "score": 4})),
            &registry(),
        )
        .unwrap();
        assert_eq!(instance.get("score"), Some(&Value::Int(4)));
        assert_eq!(instance.float("score"), Some(4.0));
    }

    #[test]
    fn test_decode_float_does_not_satisfy_int() {
        let errors = decode(
            &record(serde_json::json!({"tag": "Event", "id": 1.0, "name": "a"})),
            &registry(),
        )
        .unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::type_mismatch(
                "id",
                FieldType::Int,
                ValueKind::Float
            )]
        );
    }

    #[test]
    fn test_decode_orders_field_errors_by_declaration() {
        let errors = decode(
            &record(serde_json::json!({
                "tag": "Event",
                "extra": 1,
                "urgent": "yes",
                "name": 5
            })),
            &registry(),
        )
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::missing_field("id"),
                ValidationError::type_mismatch("name", FieldType::String, ValueKind::Int),
                ValidationError::type_mismatch("urgent", FieldType::Bool, ValueKind::String),
                ValidationError::unexpected_field("extra"),
            ]
        );
    }

    #[test]
    fn test_decode_permissive_ignores_extras() {
        let input = record(serde_json::json!({"tag": "Event", "id": 1, "name": "a", "extra": 2}));
        let instance = decode_with(&input, &registry(), &DecodeOptions::permissive()).unwrap();
        assert!(!instance.contains("extra"));

        let errors = decode_with(&input, &registry(), &DecodeOptions::strict()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::unexpected_field("extra")]);
    }

    #[test]
    fn test_decode_options_deserialize() {
        let options: DecodeOptions = serde_json::from_str(r#"{"unknown_fields": "ignore"}"#).unwrap();
        assert_eq!(options, DecodeOptions::permissive());

        let options: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecodeOptions::strict());
    }
}

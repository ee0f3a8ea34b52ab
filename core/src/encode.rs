//! Encoding typed instances back to canonical untyped records.

use crate::{EncodeError, TypedInstance, UnionRegistry, UntypedRecord, Value};

/// Encodes `instance` as its canonical record.
///
/// The record holds the tag field first, followed by the variant's declared
/// fields present in the instance, in declaration order. Entries the
/// variant does not declare are never emitted.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownTag`] if the instance's tag is not
/// registered, which happens when an instance decoded by one registry is
/// encoded with another.
///
/// # Examples
///
/// ```
/// use union_schema_core::*;
///
/// let registry = UnionRegistry::builder()
///     .variant(
///         VariantSchema::new("Variant1")
///             .with_field(FieldSchema::required("f1", FieldType::Int))
///             .with_field(FieldSchema::required("f2", FieldType::Int)),
///     )
///     .build()
///     .unwrap();
///
/// // Field order in the input does not matter; output follows the schema.
/// let record = record_from_json(&serde_json::json!({"f2": 2, "tag": "Variant1", "f1": 1})).unwrap();
/// let instance = decode(&record, &registry).unwrap();
/// let canonical = encode(&instance, &registry).unwrap();
///
/// assert_eq!(
///     canonical.keys().map(String::as_str).collect::<Vec<_>>(),
///     vec!["tag", "f1", "f2"]
/// );
/// ```
pub fn encode(
    instance: &TypedInstance,
    registry: &UnionRegistry,
) -> Result<UntypedRecord, EncodeError> {
    let variant = registry.lookup(instance.tag())?;

    let mut record = UntypedRecord::with_capacity(variant.fields.len() + 1);
    record.insert(
        registry.tag_field().to_string(),
        Value::String(instance.tag().to_string()),
    );

    for field in &variant.fields {
        if let Some(value) = instance.get(&field.name) {
            record.insert(field.name.clone(), value.clone());
        }
    }

    Ok(record)
}

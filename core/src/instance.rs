use indexmap::IndexMap;
use serde::Serialize;

use crate::Value;

/// A record that has been validated against its variant schema.
///
/// Instances can only be produced by the decoder, so every instance
/// satisfies the [`VariantSchema`](crate::VariantSchema) registered under
/// its tag. Fields are kept in the variant's declaration order; absent
/// optional fields are simply not present.
///
/// Applications dispatch on [`tag`](TypedInstance::tag) and read fields
/// through the typed accessors.
///
/// # Examples
///
/// ```
/// use union_schema_core::*;
///
/// let registry = UnionRegistry::builder()
///     .variant(
///         VariantSchema::new("Point")
///             .with_field(FieldSchema::required("x", FieldType::Float))
///             .with_field(FieldSchema::optional("label", FieldType::String)),
///     )
///     .build()
///     .unwrap();
///
/// let record = record_from_json(&serde_json::json!({"tag": "Point", "x": 3})).unwrap();
/// let point = registry.decode(&record).unwrap();
///
/// assert_eq!(point.tag(), "Point");
/// assert_eq!(point.float("x"), Some(3.0));
/// assert_eq!(point.str("label"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedInstance {
    tag: String,
    fields: IndexMap<String, Value>,
}

impl TypedInstance {
    pub(crate) fn new(tag: String, fields: IndexMap<String, Value>) -> Self {
        Self { tag, fields }
    }

    /// The variant's tag value.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Validated field values in declaration order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_int)
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Reads a float field; integral values are widened.
    pub fn float(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_float)
    }

    /// Splits the instance into its tag and field mapping.
    pub fn into_parts(self) -> (String, IndexMap<String, Value>) {
        (self.tag, self.fields)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(tag: &str, fields: &[(&str, Value)]) -> Self {
        let fields = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Self::new(tag.to_string(), fields)
    }
}

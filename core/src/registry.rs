//! The union registry: the closed set of variants a record may decode to.
//!
//! A registry is built once and is immutable afterwards. There is no
//! `&mut self` API, so a built registry can be shared across threads
//! (behind an `Arc` or a `static`) and read without synchronization.
//!
//! # Examples
//!
//! ```
//! use union_schema_core::*;
//!
//! let registry = UnionRegistry::builder()
//!     .variant(
//!         VariantSchema::new("Circle")
//!             .with_field(FieldSchema::required("radius", FieldType::Float)),
//!     )
//!     .variant(
//!         VariantSchema::new("Square")
//!             .with_field(FieldSchema::required("side", FieldType::Float)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.tag_field(), "tag");
//! assert!(registry.contains("Circle"));
//! assert!(registry.lookup("Triangle").is_err());
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    DEFAULT_TAG_FIELD, DecodeOptions, EncodeError, RegistryError, TypedInstance, UnknownTagError,
    UntypedRecord, ValidationError, VariantSchema,
};

/// Immutable, tag-indexed collection of [`VariantSchema`]s.
#[derive(Debug, Clone)]
pub struct UnionRegistry {
    tag_field: String,
    variants: IndexMap<String, VariantSchema>,
}

impl UnionRegistry {
    /// Returns a new [`RegistryBuilder`] using the default tag field.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from a tag field name and a list of variants.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`check_definitions`] reports: an empty
    /// variant list, duplicate tags, duplicate or reserved field names, or
    /// empty names.
    pub fn new(
        tag_field: impl Into<String>,
        variants: impl IntoIterator<Item = VariantSchema>,
    ) -> Result<Self, RegistryError> {
        let tag_field = tag_field.into();
        let variants: Vec<VariantSchema> = variants.into_iter().collect();

        if let Some(err) = check_definitions(&tag_field, &variants).into_iter().next() {
            return Err(err);
        }

        let variants = variants
            .into_iter()
            .map(|variant| (variant.tag_value.clone(), variant))
            .collect();

        Ok(Self {
            tag_field,
            variants,
        })
    }

    /// Name of the discriminant field.
    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    /// Looks up a variant by tag value.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTagError`] if no variant is registered under `tag`.
    pub fn lookup(&self, tag: &str) -> Result<&VariantSchema, UnknownTagError> {
        self.variants.get(tag).ok_or_else(|| UnknownTagError {
            tag: tag.to_string(),
        })
    }

    pub fn get(&self, tag: &str) -> Option<&VariantSchema> {
        self.variants.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.variants.contains_key(tag)
    }

    /// Returns the number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always `false` for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Iterates variants in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &VariantSchema> {
        self.variants.values()
    }

    /// Iterates tag values in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Decodes `record` in strict mode. See [`decode`](crate::decode).
    pub fn decode(&self, record: &UntypedRecord) -> Result<TypedInstance, Vec<ValidationError>> {
        crate::decode(record, self)
    }

    /// Decodes `record` with explicit options. See [`decode_with`](crate::decode_with).
    pub fn decode_with(
        &self,
        record: &UntypedRecord,
        options: &DecodeOptions,
    ) -> Result<TypedInstance, Vec<ValidationError>> {
        crate::decode_with(record, self, options)
    }

    /// Encodes `instance` back to its canonical record. See [`encode`](crate::encode).
    pub fn encode(&self, instance: &TypedInstance) -> Result<UntypedRecord, EncodeError> {
        crate::encode(instance, self)
    }
}

/// Accumulates variants before freezing them into a [`UnionRegistry`].
///
/// # Examples
///
/// ```
/// use union_schema_core::*;
///
/// let registry = UnionRegistry::builder()
///     .tag_field("kind")
///     .variant(VariantSchema::new("ping"))
///     .build()
///     .unwrap();
/// assert_eq!(registry.tag_field(), "kind");
///
/// let err = UnionRegistry::builder().build().unwrap_err();
/// assert_eq!(err, RegistryError::EmptyRegistry);
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    tag_field: String,
    variants: Vec<VariantSchema>,
}

impl RegistryBuilder {
    /// Creates a builder with the default tag field and no variants.
    pub fn new() -> Self {
        Self {
            tag_field: DEFAULT_TAG_FIELD.to_string(),
            variants: Vec::new(),
        }
    }

    /// Sets the discriminant field name.
    pub fn tag_field(mut self, name: &str) -> Self {
        self.tag_field = name.to_string();
        self
    }

    /// Adds a variant.
    pub fn variant(mut self, variant: VariantSchema) -> Self {
        self.variants.push(variant);
        self
    }

    /// Adds several variants.
    pub fn variants(mut self, variants: impl IntoIterator<Item = VariantSchema>) -> Self {
        self.variants.extend(variants);
        self
    }

    /// Validates the definitions and freezes them.
    ///
    /// # Errors
    ///
    /// See [`UnionRegistry::new`].
    pub fn build(self) -> Result<UnionRegistry, RegistryError> {
        UnionRegistry::new(self.tag_field, self.variants)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks variant definitions and reports every problem found.
///
/// Global problems (empty tag field name, no variants) stop the check.
/// Otherwise variants and their fields are checked in declaration order.
///
/// # Examples
///
/// ```
/// use union_schema_core::*;
///
/// let variants = vec![
///     VariantSchema::new("A")
///         .with_field(FieldSchema::required("tag", FieldType::Int))
///         .with_field(FieldSchema::required("x", FieldType::Int))
///         .with_field(FieldSchema::required("x", FieldType::Int)),
///     VariantSchema::new("A"),
/// ];
/// let errors = check_definitions("tag", &variants);
/// assert_eq!(errors.len(), 3);
/// assert!(matches!(errors[0], RegistryError::ReservedField { .. }));
/// assert!(matches!(errors[1], RegistryError::DuplicateField { .. }));
/// assert_eq!(errors[2], RegistryError::DuplicateTag("A".into()));
/// ```
pub fn check_definitions(tag_field: &str, variants: &[VariantSchema]) -> Vec<RegistryError> {
    let mut errors = Vec::new();

    if tag_field.trim().is_empty() {
        errors.push(RegistryError::EmptyTagField);
        return errors;
    }
    if variants.is_empty() {
        errors.push(RegistryError::EmptyRegistry);
        return errors;
    }

    let mut seen_tags: HashSet<&str> = HashSet::new();
    for variant in variants {
        let tag = variant.tag_value.as_str();
        if tag.is_empty() {
            errors.push(RegistryError::EmptyTagValue);
        } else if !seen_tags.insert(tag) {
            errors.push(RegistryError::DuplicateTag(tag.to_string()));
        }
        errors.extend(check_fields(tag_field, variant));
    }

    errors
}

fn check_fields(tag_field: &str, variant: &VariantSchema) -> Vec<RegistryError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let tag = &variant.tag_value;

    for field in &variant.fields {
        let name = field.name.as_str();
        if name.is_empty() {
            errors.push(RegistryError::EmptyFieldName { tag: tag.clone() });
            continue;
        }
        if name == tag_field {
            errors.push(RegistryError::ReservedField {
                tag: tag.clone(),
                field: name.to_string(),
            });
            continue;
        }
        if !seen.insert(name) {
            errors.push(RegistryError::DuplicateField {
                tag: tag.clone(),
                field: name.to_string(),
            });
        }
    }

    errors
}

//! Error types for registry construction, decoding and encoding.
//!
//! Registry errors are fatal configuration problems. Decode errors are data:
//! malformed input is routine, so the decoder returns every
//! [`ValidationError`] it finds rather than failing on the first. Encode
//! errors indicate an instance that did not come from this registry.

use serde::Serialize;
use thiserror::Error;

use crate::{FieldType, ValueKind};

/// Registry construction errors.
///
/// # Examples
///
/// ```
/// use union_schema_core::*;
///
/// let err = UnionRegistry::new("tag", vec![
///     VariantSchema::new("A"),
///     VariantSchema::new("A"),
/// ]).unwrap_err();
/// assert_eq!(err, RegistryError::DuplicateTag("A".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The configured tag field name is empty or whitespace-only.
    #[error("tag field name cannot be empty")]
    EmptyTagField,
    /// No variants were supplied.
    #[error("registry must contain at least one variant")]
    EmptyRegistry,
    /// A variant has an empty tag value.
    #[error("variant tag value cannot be empty")]
    EmptyTagValue,
    /// Two variants share a tag value.
    #[error("duplicate tag value: {0}")]
    DuplicateTag(String),
    /// A field in the variant has an empty name.
    #[error("variant '{tag}' declares a field with an empty name")]
    EmptyFieldName { tag: String },
    /// A variant declares the same field twice.
    #[error("variant '{tag}' declares field '{field}' more than once")]
    DuplicateField { tag: String, field: String },
    /// A variant declares a field that collides with the tag field.
    #[error("variant '{tag}' declares reserved tag field '{field}'")]
    ReservedField { tag: String, field: String },
}

/// Returned by [`UnionRegistry::lookup`](crate::UnionRegistry::lookup) for
/// an unregistered tag value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag value: {tag}")]
pub struct UnknownTagError {
    pub tag: String,
}

/// What went wrong at a [`ValidationError`]'s path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The record has no tag field (or it is `null`).
    MissingTag,
    /// The tag value is not registered.
    UnknownTag { tag: String },
    /// A required field is absent (or `null`).
    MissingField,
    /// A field's value does not satisfy its declared type.
    TypeMismatch {
        expected: FieldType,
        actual: ValueKind,
    },
    /// The record carries a field the variant does not declare.
    UnexpectedField,
}

/// A path-located decode failure.
///
/// The path names the offending field; for tag errors it is the tag field.
///
/// # Examples
///
/// ```
/// use union_schema_core::{ErrorKind, FieldType, ValidationError, ValueKind};
///
/// let err = ValidationError::type_mismatch("field2", FieldType::Bool, ValueKind::String);
/// assert_eq!(err.path, vec!["field2"]);
/// assert_eq!(err.to_string(), "field2: expected bool, got string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{}: {}", .path.join("."), .message)]
pub struct ValidationError {
    pub path: Vec<String>,
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn missing_tag(tag_field: &str) -> Self {
        Self {
            path: vec![tag_field.to_string()],
            kind: ErrorKind::MissingTag,
            message: format!("missing tag field '{tag_field}'"),
        }
    }

    pub fn unknown_tag(tag_field: &str, tag: &str) -> Self {
        Self {
            path: vec![tag_field.to_string()],
            kind: ErrorKind::UnknownTag {
                tag: tag.to_string(),
            },
            message: format!("unknown tag value '{tag}'"),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self {
            path: vec![field.to_string()],
            kind: ErrorKind::MissingField,
            message: format!("missing required field '{field}'"),
        }
    }

    pub fn type_mismatch(field: &str, expected: FieldType, actual: ValueKind) -> Self {
        Self {
            path: vec![field.to_string()],
            kind: ErrorKind::TypeMismatch { expected, actual },
            message: format!("expected {expected}, got {actual}"),
        }
    }

    pub fn unexpected_field(field: &str) -> Self {
        Self {
            path: vec![field.to_string()],
            kind: ErrorKind::UnexpectedField,
            message: format!("unexpected field '{field}'"),
        }
    }
}

/// Encoding failures; these signal a caller-side contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The instance's tag is not registered (stale or foreign instance).
    #[error("cannot encode instance with unregistered tag: {0}")]
    UnknownTag(String),
}

impl From<UnknownTagError> for EncodeError {
    fn from(err: UnknownTagError) -> Self {
        EncodeError::UnknownTag(err.tag)
    }
}

//! Tagged-union schemas with validating decode and canonical encode.
//!
//! This crate models single-level discriminated records: a closed set of
//! variants, each identified by a literal value in a tag field.
//!
//! - [`FieldSchema`] — one field's name, [`FieldType`], and required-ness.
//! - [`VariantSchema`] — a tag value plus its ordered fields.
//! - [`UnionRegistry`] — the frozen, tag-indexed set of variants
//!   (built with [`UnionRegistry::new`] or [`UnionRegistry::builder`]).
//! - [`decode`] / [`decode_with`] — validate an [`UntypedRecord`] and produce
//!   a [`TypedInstance`], or every [`ValidationError`] found.
//! - [`encode`] — turn a [`TypedInstance`] back into its canonical record.
//!
//! Registries are immutable once built, and decoding and encoding are pure
//! functions, so one registry can serve any number of threads.
//!
//! # Example
//!
//! ```
//! use union_schema_core::*;
//!
//! let registry = UnionRegistry::new(
//!     "tag",
//!     vec![
//!         VariantSchema::new("Variant1")
//!             .with_field(FieldSchema::required("f1", FieldType::Int))
//!             .with_field(FieldSchema::required("f2", FieldType::Int)),
//!         VariantSchema::new("Variant2")
//!             .with_field(FieldSchema::required("field1", FieldType::Int))
//!             .with_field(FieldSchema::required("field2", FieldType::Bool)),
//!     ],
//! )
//! .unwrap();
//!
//! let record = record_from_json(&serde_json::json!({"tag": "Variant1", "f1": 1, "f2": 2})).unwrap();
//! let instance = registry.decode(&record).unwrap();
//! assert_eq!(instance.tag(), "Variant1");
//! assert_eq!(instance.int("f2"), Some(2));
//!
//! assert_eq!(registry.encode(&instance).unwrap(), record);
//!
//! let unknown = record_from_json(&serde_json::json!({"tag": "Variant3"})).unwrap();
//! let errors = registry.decode(&unknown).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::unknown_tag("tag", "Variant3")]);
//! ```

mod decode;
mod encode;
mod error;
mod instance;
mod registry;
mod types;
mod value;

pub use decode::{DecodeOptions, UnknownFields, decode, decode_with};
pub use encode::encode;
pub use error::{EncodeError, ErrorKind, RegistryError, UnknownTagError, ValidationError};
pub use instance::TypedInstance;
pub use registry::{RegistryBuilder, UnionRegistry, check_definitions};
pub use types::*;
pub use value::{RecordError, UntypedRecord, Value, ValueKind, record_from_json, record_to_json};

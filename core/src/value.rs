//! Untyped scalar values and records.
//!
//! An [`UntypedRecord`] is the boundary representation exchanged with
//! external systems: a string-keyed mapping of scalar (or null) values.
//! Insertion order is preserved so that encoding a decoded record
//! reproduces the original field order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Untyped record: field name → scalar value, in insertion order.
pub type UntypedRecord = IndexMap<String, Value>;

/// A scalar value as it appears in an untyped record.
///
/// Serializes untagged, so JSON scalars map directly onto variants.
///
/// # Examples
///
/// ```
/// use union_schema_core::{Value, ValueKind};
///
/// let v: Value = serde_json::from_str("42").unwrap();
/// assert_eq!(v, Value::Int(42));
/// assert_eq!(v.kind(), ValueKind::Int);
///
/// let v: Value = serde_json::from_str("null").unwrap();
/// assert!(v.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Returns the dynamic kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Dynamic type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

/// Errors converting a JSON document into an [`UntypedRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The document is not a JSON object.
    #[error("record must be a JSON object")]
    NotAnObject,
    /// A field holds an array or object instead of a scalar.
    #[error("field '{field}' must hold a scalar value")]
    NonScalar { field: String },
    /// An integer literal does not fit in `i64`.
    #[error("field '{field}' holds an integer outside the 64-bit signed range")]
    IntegerOutOfRange { field: String },
}

/// Converts a JSON object of scalars into an [`UntypedRecord`].
///
/// Integer literals become [`Value::Int`]. One above `i64::MAX` is rejected
/// with [`RecordError::IntegerOutOfRange`] rather than narrowed to a float.
/// Fractional and exponent numbers become [`Value::Float`], as do integers
/// too large for `serde_json` to hold as `u64`/`i64` in the first place.
///
/// # Examples
///
/// ```
/// use union_schema_core::{record_from_json, RecordError, Value};
///
/// let record = record_from_json(&serde_json::json!({"tag": "A", "n": 1})).unwrap();
/// assert_eq!(record["n"], Value::Int(1));
///
/// let err = record_from_json(&serde_json::json!({"n": [1, 2]})).unwrap_err();
/// assert_eq!(err, RecordError::NonScalar { field: "n".into() });
/// ```
pub fn record_from_json(json: &serde_json::Value) -> Result<UntypedRecord, RecordError> {
    let object = json.as_object().ok_or(RecordError::NotAnObject)?;
    let mut record = UntypedRecord::with_capacity(object.len());

    for (key, value) in object {
        let value = match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None if n.is_u64() => {
                    return Err(RecordError::IntegerOutOfRange { field: key.clone() });
                }
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(RecordError::NonScalar { field: key.clone() });
            }
        };
        record.insert(key.clone(), value);
    }

    Ok(record)
}

/// Converts an [`UntypedRecord`] into a JSON object in field order.
///
/// Non-finite floats have no JSON form and become `null`.
pub fn record_to_json(record: &UntypedRecord) -> serde_json::Value {
    let object = record
        .iter()
        .map(|(key, value)| {
            let json = match value {
                Value::Null => serde_json::Value::Null,
                Value::Bool(b) => serde_json::Value::Bool(*b),
                Value::Int(i) => serde_json::Value::from(*i),
                Value::Float(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                Value::String(s) => serde_json::Value::String(s.clone()),
            };
            (key.clone(), json)
        })
        .collect();
    serde_json::Value::Object(object)
}

//! Reading record streams.
//!
//! Input is either a single JSON array of objects or a sequence of JSON
//! objects separated by whitespace (JSON lines being the common case).

use std::io::Read;

use tracing::debug;
use union_schema_core::{UntypedRecord, record_from_json};

use crate::error::{LoaderError, Result};

/// Reads every record from `reader`.
///
/// # Errors
///
/// Returns [`LoaderError::JsonError`] if the input is not valid JSON, or
/// [`LoaderError::InvalidRecord`] (with a 1-based index) if an element is
/// not a flat object of scalars.
///
/// # Examples
///
/// ```
/// use union_schema_core::Value;
/// use union_schema_loader::read_records;
///
/// let input = "{\"tag\": \"A\", \"n\": 1}\n{\"tag\": \"B\"}\n";
/// let records = read_records(input.as_bytes()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0]["n"], Value::Int(1));
///
/// let array = r#"[{"tag": "A"}, {"tag": "B"}]"#;
/// assert_eq!(read_records(array.as_bytes()).unwrap().len(), 2);
/// ```
pub fn read_records(mut reader: impl Read) -> Result<Vec<UntypedRecord>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let documents: Vec<serde_json::Value> = if text.trim_start().starts_with('[') {
        serde_json::from_str(&text)?
    } else {
        serde_json::Deserializer::from_str(&text)
            .into_iter::<serde_json::Value>()
            .collect::<std::result::Result<_, _>>()?
    };

    let records = documents
        .iter()
        .enumerate()
        .map(|(i, json)| {
            record_from_json(json).map_err(|source| LoaderError::InvalidRecord {
                index: i + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(records = records.len(), "Read record stream");
    Ok(records)
}

//! Error types for loading registries, configuration and records.

use std::path::PathBuf;

use thiserror::Error;
use union_schema_core::{RecordError, RegistryError};

/// Errors that can occur while loading schema inputs.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document parsed but its variant definitions are invalid.
    #[error("invalid registry: {0}")]
    Registry(#[from] RegistryError),

    /// A record in an input stream is not a flat JSON object.
    #[error("record {index}: {source}")]
    InvalidRecord {
        /// 1-based position in the stream.
        index: usize,
        source: RecordError,
    },
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;

//! Validator configuration.
//!
//! Names the registry document to decode against and the decoder policy.
//!
//! # Example YAML
//!
//! ```yaml
//! registry: schemas/events.yaml
//! unknown_fields: reject   # or: ignore
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use union_schema_core::{DecodeOptions, UnionRegistry, UnknownFields};

use crate::document::{DocumentFormat, load_registry};
use crate::error::Result;

/// Configuration for a decoding run.
///
/// # Examples
///
/// ```
/// use union_schema_core::UnknownFields;
/// use union_schema_loader::ValidatorConfig;
///
/// let config: ValidatorConfig = serde_yaml::from_str("registry: events.yaml").unwrap();
/// assert_eq!(config.unknown_fields, UnknownFields::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Path of the registry document. Relative paths are resolved against
    /// the directory of the configuration file when loaded with
    /// [`ValidatorConfig::load`].
    pub registry: PathBuf,
    /// What to do with fields a variant does not declare.
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

impl ValidatorConfig {
    /// Creates a strict configuration for `registry`.
    pub fn new(registry: impl Into<PathBuf>) -> Self {
        Self {
            registry: registry.into(),
            unknown_fields: UnknownFields::default(),
        }
    }

    /// Loads configuration from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](crate::LoaderError::UnsupportedFormat)
    /// for an unknown extension, [`IoError`](crate::LoaderError::IoError)
    /// if the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let mut config: Self = match format {
            DocumentFormat::Json => serde_json::from_reader(reader)?,
            DocumentFormat::Yaml => serde_yaml::from_reader(reader)?,
        };

        if config.registry.is_relative() {
            if let Some(dir) = path.parent() {
                config.registry = dir.join(&config.registry);
            }
        }

        Ok(config)
    }

    /// Saves the configuration as JSON or YAML.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](crate::LoaderError::UnsupportedFormat)
    /// for an unknown extension, [`IoError`](crate::LoaderError::IoError)
    /// if the file cannot be written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            DocumentFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            DocumentFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Decoder options described by this configuration.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            unknown_fields: self.unknown_fields,
        }
    }

    /// Loads the configured registry.
    ///
    /// # Errors
    ///
    /// Any error from [`load_registry`].
    pub fn load_registry(&self) -> Result<UnionRegistry> {
        load_registry(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_permissive() {
        let config: ValidatorConfig =
            serde_yaml::from_str("registry: r.json\nunknown_fields: ignore\n").unwrap();
        assert_eq!(config.registry, PathBuf::from("r.json"));
        assert_eq!(config.decode_options(), DecodeOptions::permissive());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let result = serde_yaml::from_str::<ValidatorConfig>("registry: r.json\nunknown_fields: maybe\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_relative_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.yaml");
        ValidatorConfig::new("schemas/registry.json")
            .save(&path)
            .unwrap();

        let loaded = ValidatorConfig::load(&path).unwrap();
        assert_eq!(loaded.registry, dir.path().join("schemas/registry.json"));
        assert_eq!(loaded.unknown_fields, UnknownFields::Reject);
    }

    #[test]
    fn test_load_keeps_absolute_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.json");
        let absolute = dir.path().join("elsewhere.yaml");
        ValidatorConfig::new(&absolute).save(&path).unwrap();

        let loaded = ValidatorConfig::load(&path).unwrap();
        assert_eq!(loaded.registry, absolute);
    }
}

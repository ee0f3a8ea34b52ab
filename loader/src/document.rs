//! Persisted registry documents.
//!
//! A registry document is the file form of a [`UnionRegistry`]. It maps 1:1
//! onto the registry's definition surface and can be written as JSON or
//! YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! schemaVersion: "1.0.0"
//! tagFieldName: tag
//! variants:
//!   - tagValue: Variant1
//!     fields:
//!       - { name: f1, type: int, required: true }
//!       - { name: f2, type: int, required: true }
//!   - tagValue: Variant2
//!     fields:
//!       - { name: field1, type: int }
//!       - { name: field2, type: bool }
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;
use union_schema_core::{
    DEFAULT_TAG_FIELD, RegistryError, SCHEMA_CONTRACT_VERSION, UnionRegistry, VariantSchema,
    check_definitions,
};

use crate::error::{LoaderError, Result};

/// Serialization format of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detects the format from `.json`, `.yaml` or `.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedFormat`] for any other extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use union_schema_loader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path("r.yml").unwrap(), DocumentFormat::Yaml);
    /// assert_eq!(DocumentFormat::from_path("r.JSON").unwrap(), DocumentFormat::Json);
    /// assert!(DocumentFormat::from_path("r.toml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// File form of a union registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    /// Document contract version (populated from [`SCHEMA_CONTRACT_VERSION`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Name of the discriminant field.
    #[serde(default = "default_tag_field")]
    pub tag_field_name: String,
    /// Variant definitions in registration order.
    pub variants: Vec<VariantSchema>,
}

fn default_tag_field() -> String {
    DEFAULT_TAG_FIELD.to_string()
}

impl RegistryDocument {
    /// Creates a document with the default tag field.
    pub fn new(variants: Vec<VariantSchema>) -> Self {
        Self {
            schema_version: Some(SCHEMA_CONTRACT_VERSION.to_string()),
            tag_field_name: default_tag_field(),
            variants,
        }
    }

    /// Captures an existing registry as a document.
    pub fn from_registry(registry: &UnionRegistry) -> Self {
        Self {
            schema_version: Some(SCHEMA_CONTRACT_VERSION.to_string()),
            tag_field_name: registry.tag_field().to_string(),
            variants: registry.variants().cloned().collect(),
        }
    }

    /// Parses a document from text.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::JsonError`] or [`LoaderError::YamlError`] if
    /// the text does not parse.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let document = match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(document)
    }

    /// Loads a document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedFormat`], an I/O error, or a parse
    /// error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let document = match format {
            DocumentFormat::Json => serde_json::from_reader(reader)?,
            DocumentFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        Ok(document)
    }

    /// Saves the document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedFormat`], an I/O error, or a
    /// serialization error.
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

    /// Reports every definition problem in this document.
    pub fn check(&self) -> Vec<RegistryError> {
        check_definitions(&self.tag_field_name, &self.variants)
    }

    /// Freezes the document into a registry.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Registry`] with the first definition problem.
    pub fn into_registry(self) -> Result<UnionRegistry> {
        Ok(UnionRegistry::new(self.tag_field_name, self.variants)?)
    }

    /// SHA-256 hex digest of the document's compact JSON form.
    ///
    /// Identical definitions give identical fingerprints regardless of
    /// which file format they were loaded from, so the fingerprint can
    /// identify a schema version.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::JsonError`] if serialization fails.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let hash = Sha256::digest(&bytes);
        Ok(format!("{:x}", hash))
    }
}

/// Loads a document and freezes it into a registry.
///
/// # Errors
///
/// Any error from [`RegistryDocument::load`] or
/// [`RegistryDocument::into_registry`].
///
/// # Examples
///
/// ```no_run
/// use union_schema_loader::load_registry;
///
/// let registry = load_registry("schemas/events.yaml").unwrap();
/// println!("{} variants keyed by '{}'", registry.len(), registry.tag_field());
/// ```
pub fn load_registry(path: impl AsRef<Path>) -> Result<UnionRegistry> {
    let path = path.as_ref();
    let document = RegistryDocument::load(path)?;
    let fingerprint = document.fingerprint()?;
    let registry = document.into_registry()?;
    info!(
        path = %path.display(),
        variants = registry.len(),
        fingerprint = %fingerprint,
        "Loaded registry"
    );
    Ok(registry)
}

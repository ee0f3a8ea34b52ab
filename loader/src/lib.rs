//! Loading union registries, validator configuration and record streams.
//!
//! This crate connects the in-memory core to files:
//!
//! - [`RegistryDocument`] — the JSON/YAML form of a registry, with
//!   [`check`](RegistryDocument::check) for reporting every definition
//!   problem and [`fingerprint`](RegistryDocument::fingerprint) for
//!   identifying a schema version.
//! - [`ValidatorConfig`] — which registry to use and how strictly to decode.
//! - [`read_records`] — JSON array or JSON-lines record input.
//!
//! # Quick start
//!
//! ```no_run
//! use union_schema_loader::{ValidatorConfig, read_records};
//!
//! let config = ValidatorConfig::load("validator.yaml").unwrap();
//! let registry = config.load_registry().unwrap();
//! let options = config.decode_options();
//!
//! let records = read_records(std::io::stdin()).unwrap();
//! for record in &records {
//!     match registry.decode_with(record, &options) {
//!         Ok(instance) => println!("ok: {}", instance.tag()),
//!         Err(errors) => println!("{} errors", errors.len()),
//!     }
//! }
//! ```

mod config;
mod document;
mod error;
mod records;

pub use config::ValidatorConfig;
pub use document::{DocumentFormat, RegistryDocument, load_registry};
pub use error::{LoaderError, Result};
pub use records::read_records;

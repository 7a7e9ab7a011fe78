//! Schema registry loading and parser configuration.
//!
//! This crate provides infrastructure for loading content schemas from
//! various sources (directories, bundle files, embedded data) into a
//! [`SchemaRegistry`](content_schema_core::SchemaRegistry), and for reading
//! the YAML configuration that drives a parse run.
//!
//! # Quick start
//!
//! ```no_run
//! use content_schema_core::{ComponentParser, ContentType, ItemDescription};
//! use content_schema_db::{ParserConfig, SchemaCatalog};
//!
//! let config = ParserConfig::load("content-schema.yml").unwrap();
//! let catalog = match &config.schemas {
//!     Some(dir) => SchemaCatalog::builder().from_dir(dir).with_builtin().build().unwrap(),
//!     None => SchemaCatalog::builtin().unwrap(),
//! };
//!
//! let parser = ComponentParser::new(catalog.registry()).with_options(config.validation);
//! let outcome = parser
//!     .parse(&ItemDescription::new("Stone").with_field("Namespace", "myaddon"), ContentType::Block)
//!     .unwrap();
//! assert!(!config.fail_on.blocks(&outcome.diagnostics));
//! ```

mod builtin;
mod config;
mod error;
mod loader;

pub use builtin::{builtin_registry, builtin_source};
pub use config::{FailOn, ParserConfig};
pub use error::{LoaderError, Result};
pub use loader::{CatalogBuilder, SchemaCatalog, SchemaSource};

//! Schema loading with builder pattern and fallback chains.
//!
//! Provides [`SchemaCatalog`] for loading a [`SchemaRegistry`] from a
//! directory, a bundle file, or the embedded schemas, and [`CatalogBuilder`]
//! for constructing one from multiple sources with automatic fallback.
//!
//! # Loading patterns
//!
//! ```no_run
//! use content_schema_db::SchemaCatalog;
//!
//! // One file per content type: block.json, item.yaml, ...
//! let catalog = SchemaCatalog::from_dir("schemas/").unwrap();
//!
//! // A single JSON document keyed by content type
//! let catalog = SchemaCatalog::from_bundle("schemas.json").unwrap();
//!
//! // Use the builder for a fallback chain ending in the embedded schemas
//! let catalog = SchemaCatalog::builder()
//!     .from_dir("schemas/")
//!     .with_builtin()
//!     .build()
//!     .unwrap();
//! ```
//!
//! Every source is checked with
//! [`validate_registry`](content_schema_core::validate_registry) before it is
//! accepted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use content_schema_core::{
    AliasResolver, ComponentSchema, ContentType, SchemaRegistry, validate_registry,
};
use tracing::debug;

use crate::builtin::builtin_registry;
use crate::error::{LoaderError, Result};

/// Describes where a [`SchemaCatalog`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Loaded from a directory of per-content-type schema files.
    Directory(PathBuf),
    /// Loaded from a single bundle file.
    Bundle(PathBuf),
    /// Loaded from the schemas embedded in this crate.
    Builtin,
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<SchemaSource>),
}

/// A validated [`SchemaRegistry`] together with its origin.
///
/// # Examples
///
/// ```
/// use content_schema_core::ContentType;
/// use content_schema_db::{SchemaCatalog, SchemaSource};
///
/// let catalog = SchemaCatalog::builtin().unwrap();
/// assert_eq!(catalog.source(), &SchemaSource::Builtin);
/// assert!(catalog.registry().contains(ContentType::Recipe));
/// ```
#[derive(Debug)]
pub struct SchemaCatalog {
    registry: SchemaRegistry,
    source: SchemaSource,
}

impl SchemaCatalog {
    /// Returns a new [`CatalogBuilder`] for configuring a fallback chain.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Loads `<content type>.json`, `.yaml`, or `.yml` files from a
    /// directory. Content types without a file are left unregistered.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::IoError`] if a file cannot be read,
    /// [`LoaderError::JsonError`]/[`LoaderError::YamlError`] if one does not
    /// parse, [`LoaderError::InvalidSchema`] if a schema fails validation, or
    /// [`LoaderError::NoSchemasFound`] if no schema file exists.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut registry = SchemaRegistry::new();

        for content_type in ContentType::ALL {
            let Some(file) = schema_file(path, content_type) else {
                continue;
            };
            let schema = read_schema(&file)?;
            debug!(
                content_type = %content_type,
                fields = schema.len(),
                path = %file.display(),
                "Loaded schema"
            );
            registry.insert(content_type, schema);
        }

        if registry.is_empty() {
            return Err(LoaderError::NoSchemasFound(path.to_path_buf()));
        }
        Self::validated(registry, SchemaSource::Directory(path.to_path_buf()))
    }

    /// Loads a JSON bundle mapping content type tags to schemas:
    /// `{ "block": { ... }, "item": { ... } }`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::IoError`] if the file cannot be read,
    /// [`LoaderError::JsonError`] if parsing fails,
    /// [`LoaderError::UnknownContentType`] for an unsupported key, or
    /// [`LoaderError::InvalidSchema`] if a schema fails validation.
    pub fn from_bundle(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let bundle: BTreeMap<String, ComponentSchema> = serde_json::from_reader(reader)?;

        let mut registry = SchemaRegistry::new();
        for (tag, schema) in bundle {
            let content_type: ContentType = tag
                .parse()
                .map_err(|_| LoaderError::UnknownContentType(tag.clone()))?;
            registry.insert(content_type, schema);
        }

        Self::validated(registry, SchemaSource::Bundle(path.to_path_buf()))
    }

    /// Loads the schemas embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::JsonError`] or [`LoaderError::InvalidSchema`]
    /// if an embedded schema is broken.
    pub fn builtin() -> Result<Self> {
        Self::validated(builtin_registry()?, SchemaSource::Builtin)
    }

    fn validated(registry: SchemaRegistry, source: SchemaSource) -> Result<Self> {
        let mut errors = validate_registry(&registry, &AliasResolver::default());
        if !errors.is_empty() {
            errors.sort_by_key(|(content_type, _)| *content_type);
            return Err(LoaderError::InvalidSchema { errors });
        }
        Ok(Self { registry, source })
    }

    /// Returns the loaded registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Consumes the catalog, returning its registry.
    pub fn into_registry(self) -> SchemaRegistry {
        self.registry
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &SchemaSource {
        &self.source
    }
}

/// Builder for constructing a [`SchemaCatalog`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`LoaderError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use content_schema_db::SchemaCatalog;
///
/// let catalog = SchemaCatalog::builder()
///     .from_dir("/opt/addon/schemas/")
///     .from_bundle("/opt/addon/schemas.json")
///     .with_builtin()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct CatalogBuilder {
    sources: Vec<SchemaSource>,
}

impl CatalogBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds the embedded schemas as a source.
    pub fn with_builtin(mut self) -> Self {
        self.sources.push(SchemaSource::Builtin);
        self
    }

    /// Adds a directory of per-content-type schema files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(SchemaSource::Directory(path.into()));
        self
    }

    /// Adds a bundle file as a source.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(SchemaSource::Bundle(path.into()));
        self
    }

    /// Attempts to load schemas from configured sources in order.
    ///
    /// Returns the first successfully loaded catalog. If all sources fail,
    /// returns [`LoaderError::NoSourcesAvailable`].
    pub fn build(self) -> Result<SchemaCatalog> {
        if self.sources.is_empty() {
            return Err(LoaderError::NoSourcesAvailable);
        }

        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                SchemaSource::Directory(path) => SchemaCatalog::from_dir(path),
                SchemaSource::Bundle(path) => SchemaCatalog::from_bundle(path),
                SchemaSource::Builtin => SchemaCatalog::builtin(),
                SchemaSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut catalog) => {
                    catalog.source = SchemaSource::Multiple(all_sources);
                    return Ok(catalog);
                }
                Err(err) => debug!(source = ?source, error = %err, "Schema source failed"),
            }
        }

        Err(LoaderError::NoSourcesAvailable)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn schema_file(dir: &Path, content_type: ContentType) -> Option<PathBuf> {
    ["json", "yaml", "yml"]
        .into_iter()
        .map(|ext| dir.join(format!("{}.{ext}", content_type.as_str())))
        .find(|path| path.is_file())
}

fn read_schema(path: &Path) -> Result<ComponentSchema> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        Ok(serde_yaml::from_reader(reader)?)
    } else {
        Ok(serde_json::from_reader(reader)?)
    }
}

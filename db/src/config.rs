//! Parser configuration.
//!
//! Defines the YAML-serializable configuration controlling where schemas come
//! from, how validation behaves, and which diagnostic severity makes a run
//! fail.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! schemas: ./schemas
//! validation:
//!   max_items: reject_at_limit
//! fail_on: error
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use content_schema_core::{Diagnostic, Severity, ValidationOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lowest diagnostic severity that marks a parse as failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Fail when any error is recorded.
    #[default]
    Error,
    /// Fail on warnings as well as errors.
    Warning,
    /// Never fail on diagnostics.
    Never,
}

impl FailOn {
    /// Returns `true` if `diagnostics` should fail the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_schema_core::{Diagnostics, ValidationError};
    /// use content_schema_db::FailOn;
    ///
    /// let mut diagnostics = Diagnostics::new("Stone");
    /// diagnostics.report(ValidationError::DefaultApplied("minecraft:friction".into()));
    /// let diagnostics = diagnostics.into_vec();
    ///
    /// assert!(!FailOn::Error.blocks(&diagnostics));
    /// assert!(FailOn::Warning.blocks(&diagnostics));
    /// assert!(!FailOn::Never.blocks(&diagnostics));
    /// ```
    pub fn blocks(&self, diagnostics: &[Diagnostic]) -> bool {
        let threshold = match self {
            FailOn::Error => Severity::Error,
            FailOn::Warning => Severity::Warning,
            FailOn::Never => return false,
        };
        diagnostics.iter().any(|d| d.severity >= threshold)
    }
}

/// Top-level parser configuration.
///
/// Loaded from a YAML file (typically `content-schema.yml` next to the
/// descriptions). Every key is optional.
///
/// # Examples
///
/// ```no_run
/// use content_schema_db::ParserConfig;
///
/// let config = ParserConfig::load("content-schema.yml").unwrap();
/// if let Some(dir) = &config.schemas {
///     println!("schemas from {}", dir.display());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Directory of per-content-type schema files; embedded schemas are used
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<PathBuf>,
    /// Options passed to the parser.
    pub validation: ValidationOptions,
    /// Exit policy for the command-line wrapper.
    pub fail_on: FailOn,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            schemas: None,
            validation: ValidationOptions::default(),
            fail_on: FailOn::default(),
        }
    }
}

impl ParserConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoaderError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::LoaderError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoaderError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::LoaderError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

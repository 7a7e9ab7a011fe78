//! Error types for schema loading and configuration.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! serialization, and schemas that fail definition validation.

use std::path::PathBuf;

use content_schema_core::{ContentType, SchemaError};
use thiserror::Error;

/// Errors that can occur while loading schemas or configuration.
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

    /// One or more loaded schemas failed definition validation. Every
    /// problem is listed, tagged with its content type.
    #[error("invalid schema: {}", join_errors(.errors))]
    InvalidSchema {
        errors: Vec<(ContentType, SchemaError)>,
    },

    /// A bundle key is not a supported content type.
    #[error("unknown content type in bundle: {0}")]
    UnknownContentType(String),

    /// A schema directory contained no `<content type>.json|yaml` files.
    #[error("no schema files found in {}", .0.display())]
    NoSchemasFound(PathBuf),

    /// All configured loader sources failed.
    #[error("no schema sources available")]
    NoSourcesAvailable,
}

fn join_errors(errors: &[(ContentType, SchemaError)]) -> String {
    errors
        .iter()
        .map(|(content_type, err)| format!("{content_type}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;

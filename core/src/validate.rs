//! Schema definition validation.
//!
//! Checks structural invariants of [`ComponentSchema`] definitions before they
//! are used to parse descriptions: empty names, duplicate properties, defaults
//! that do not satisfy their declared type, unusable array declarations, and
//! computed aliases that can never resolve.
//!
//! # Examples
//!
//! ```
//! use content_schema_core::*;
//!
//! let aliases = AliasResolver::default();
//! let schema = ComponentSchema::new()
//!     .with_field("Friction", FieldSpec::new("minecraft:friction", FieldType::Float));
//! assert!(validate_schema(&schema, &aliases).is_empty());
//!
//! // Invalid: default does not satisfy the declared type
//! let bad = ComponentSchema::new()
//!     .with_field("Friction", FieldSpec::new("minecraft:friction", FieldType::Float).with_default("low"));
//! assert!(!validate_schema(&bad, &aliases).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::alias::{AliasResolver, ComputedAlias, is_computed};
use crate::registry::SchemaRegistry;
use crate::types::{ComponentSchema, ContentType, FieldSpec, FieldType, ValueKind};

/// Schema definition errors.
///
/// `path` values are dotted locations such as `Flammable.catch_chance_modifier`
/// (`[]` marks an array element spec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema field name cannot be empty")]
    EmptyFieldName,
    #[error("{0}: field declares no alternatives")]
    EmptyUnion(String),
    #[error("{0}: property name cannot be empty")]
    EmptyPropertyName(String),
    #[error("{path}: duplicate property name {name}")]
    DuplicateProperty { path: String, name: String },
    #[error("{path}: duplicate property alias {alias}")]
    DuplicateAlias { path: String, alias: String },
    #[error("{path}: default value does not satisfy declared type {expected}")]
    DefaultTypeMismatch { path: String, expected: &'static str },
    #[error("{0}: maxItems must be greater than zero")]
    ZeroMaxItems(String),
    /// Array elements of this type are rejected at parse time.
    #[error("{path}: array elements of type {element_type} are not supported")]
    UnsupportedArrayItems {
        path: String,
        element_type: &'static str,
    },
    #[error("{path}: malformed computed alias {alias}")]
    MalformedComputedAlias { path: String, alias: String },
    #[error("{path}: unknown alias strategy {strategy}")]
    UnknownAliasStrategy { path: String, strategy: String },
    #[error("{path}: computed alias references undeclared property {sibling}")]
    UnknownAliasSibling { path: String, sibling: String },
}

/// Validates every schema in a registry.
pub fn validate_registry(
    registry: &SchemaRegistry,
    aliases: &AliasResolver,
) -> Vec<(ContentType, SchemaError)> {
    registry
        .iter()
        .flat_map(|(content_type, schema)| {
            validate_schema(schema, aliases)
                .into_iter()
                .map(move |err| (content_type, err))
        })
        .collect()
}

/// Validates a component schema.
///
/// Unlike parsing, validation collects every problem rather than stopping at
/// the first.
pub fn validate_schema(schema: &ComponentSchema, aliases: &AliasResolver) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for (field, alternatives) in schema.fields() {
        if field.trim().is_empty() {
            errors.push(SchemaError::EmptyFieldName);
            continue;
        }
        if alternatives.is_empty() {
            errors.push(SchemaError::EmptyUnion(field.to_string()));
            continue;
        }
        for spec in alternatives {
            validate_spec(field, spec, aliases, &mut errors);
        }
    }

    errors
}

fn validate_spec(path: &str, spec: &FieldSpec, aliases: &AliasResolver, errors: &mut Vec<SchemaError>) {
    if let Some(default) = &spec.default {
        if !spec.kind.accepts(ValueKind::of(default)) {
            errors.push(SchemaError::DefaultTypeMismatch {
                path: path.to_string(),
                expected: spec.kind.type_name(),
            });
        }
    }

    match &spec.kind {
        FieldType::Object { properties } => validate_properties(path, properties, aliases, errors),
        FieldType::Array { items, max_items } => {
            if *max_items == Some(0) {
                errors.push(SchemaError::ZeroMaxItems(path.to_string()));
            }
            let element_path = format!("{path}[]");
            match &items.kind {
                FieldType::String | FieldType::Number | FieldType::Boolean => {
                    errors.push(SchemaError::UnsupportedArrayItems {
                        path: element_path,
                        element_type: items.kind.type_name(),
                    });
                }
                _ => validate_spec(&element_path, items, aliases, errors),
            }
        }
        _ => {}
    }
}

fn validate_properties(
    path: &str,
    properties: &[FieldSpec],
    aliases: &AliasResolver,
    errors: &mut Vec<SchemaError>,
) {
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut seen_aliases: HashSet<&str> = HashSet::new();
    let declared: HashSet<&str> = properties
        .iter()
        .map(FieldSpec::alias)
        .filter(|alias| !is_computed(alias))
        .collect();

    for property in properties {
        if property.name.trim().is_empty() {
            errors.push(SchemaError::EmptyPropertyName(path.to_string()));
            continue;
        }
        if !seen_names.insert(property.name.as_str()) {
            errors.push(SchemaError::DuplicateProperty {
                path: path.to_string(),
                name: property.name.clone(),
            });
        }

        let alias = property.alias();
        if is_computed(alias) {
            match ComputedAlias::parse(alias) {
                None => errors.push(SchemaError::MalformedComputedAlias {
                    path: path.to_string(),
                    alias: alias.to_string(),
                }),
                Some(computed) => {
                    if !aliases.has_strategy(computed.strategy) {
                        errors.push(SchemaError::UnknownAliasStrategy {
                            path: path.to_string(),
                            strategy: computed.strategy.to_string(),
                        });
                    }
                    if !declared.contains(computed.argument) {
                        errors.push(SchemaError::UnknownAliasSibling {
                            path: path.to_string(),
                            sibling: computed.argument.to_string(),
                        });
                    }
                }
            }
        } else if !seen_aliases.insert(alias) {
            errors.push(SchemaError::DuplicateAlias {
                path: path.to_string(),
                alias: alias.to_string(),
            });
        }

        validate_spec(&format!("{path}.{}", property.name), property, aliases, errors);
    }
}

//! Top-level description parsing.
//!
//! [`ComponentParser`] walks an [`ItemDescription`]'s fields in authored
//! order. Identity fields rewrite the output identity; every other field is
//! resolved against the content type's schema and validated recursively.
//! Field-level problems become diagnostics and never stop the walk.

use tracing::{debug, trace};

use crate::alias::{AliasResolver, AliasStrategy};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ParseError, ValidationError};
use crate::identity::IdentityField;
use crate::options::ValidationOptions;
use crate::parser::TypeParser;
use crate::registry::SchemaRegistry;
use crate::types::{ContentType, ItemDescription, OutputTree, RESERVED_KEYS};

/// Result of parsing one description.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub tree: OutputTree,
    /// Every diagnostic raised, in the order it was raised.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parses descriptions against a shared, read-only [`SchemaRegistry`].
///
/// A parser holds no per-parse state, so one instance can serve concurrent
/// parses; each call builds its own [`OutputTree`].
///
/// # Examples
///
/// ```
/// use content_schema_core::*;
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new().with_schema(
///     ContentType::Block,
///     ComponentSchema::new()
///         .with_field("Friction", FieldSpec::new("minecraft:friction", FieldType::Float)),
/// );
/// let parser = ComponentParser::new(&registry);
///
/// let description = ItemDescription::new("Stone")
///     .with_field("Namespace", "myaddon")
///     .with_field("Friction", 0.6)
///     .with_field("Glow", true);
///
/// let outcome = parser.parse(&description, ContentType::Block).unwrap();
/// assert_eq!(outcome.tree.identifier.as_deref(), Some("myaddon:stone"));
/// assert_eq!(outcome.tree.component("minecraft:friction"), Some(&json!(0.6)));
/// assert_eq!(outcome.diagnostics.len(), 1); // Glow is not in the schema
/// ```
#[derive(Debug)]
pub struct ComponentParser<'r> {
    registry: &'r SchemaRegistry,
    options: ValidationOptions,
    aliases: AliasResolver,
}

impl<'r> ComponentParser<'r> {
    /// Creates a parser with default options and the built-in alias
    /// strategies.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            options: ValidationOptions::default(),
            aliases: AliasResolver::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers an additional computed-alias strategy.
    pub fn with_alias_strategy(mut self, strategy: impl AliasStrategy + 'static) -> Self {
        self.aliases.register(strategy);
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    /// Parses `description` as content of type `content_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::SchemaNotLoaded`] if the registry has no schema
    /// for `content_type`. Field-level problems are reported in
    /// [`ParseOutcome::diagnostics`] instead.
    pub fn parse(
        &self,
        description: &ItemDescription,
        content_type: ContentType,
    ) -> Result<ParseOutcome, ParseError> {
        let schema = self.registry.resolve(content_type)?;
        debug!(
            subject = %description.name,
            content_type = %content_type,
            fields = description.fields.len(),
            "Parsing item description"
        );

        let mut diagnostics = Diagnostics::new(&description.name);
        let mut tree = OutputTree {
            identifier: description.identifier.clone(),
            ..OutputTree::default()
        };

        for (field, value) in &description.fields {
            if RESERVED_KEYS.contains(&field.as_str()) {
                trace!(field, "Skipping reserved key");
                continue;
            }

            let identity = IdentityField::from_name(field);
            if let Some(identity) = identity {
                if let Err(err) = identity.apply(value, &description.name, &mut tree) {
                    diagnostics.report(err);
                }
            }

            match schema.alternatives(field) {
                Some(alternatives) => {
                    TypeParser::new(&self.options, &self.aliases, &mut diagnostics).parse_field(
                        field,
                        value,
                        alternatives,
                        &mut tree.components,
                    );
                }
                None if identity.is_some() => {}
                None => {
                    diagnostics.report(ValidationError::UnknownComponentType(field.clone()));
                }
            }
        }

        debug!(
            subject = %description.name,
            components = tree.components.len(),
            diagnostics = diagnostics.len(),
            "Parsed item description"
        );
        Ok(ParseOutcome {
            tree,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Parses with a content type given by its tag (`"block"`, `"item"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownContentType`] for an unsupported tag, in
    /// addition to the errors of [`parse`](Self::parse).
    pub fn parse_tagged(
        &self,
        description: &ItemDescription,
        content_type: &str,
    ) -> Result<ParseOutcome, ParseError> {
        self.parse(description, content_type.parse()?)
    }
}

/// Parses `description` with default options.
///
/// # Errors
///
/// See [`ComponentParser::parse`].
pub fn parse_component(
    description: &ItemDescription,
    content_type: ContentType,
    registry: &SchemaRegistry,
) -> Result<ParseOutcome, ParseError> {
    ComponentParser::new(registry).parse(description, content_type)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::diagnostics::Severity;
    use crate::types::{ComponentSchema, FieldSpec, FieldType};

    fn block_registry() -> SchemaRegistry {
        let schema = ComponentSchema::new()
            .with_field(
                "Friction",
                FieldSpec::new("minecraft:friction", FieldType::Float).with_default(0.4),
            )
            .with_field(
                "LightEmission",
                FieldSpec::new("minecraft:light_emission", FieldType::Int),
            )
            .with_field(
                "Category",
                FieldSpec::new("menu_category", FieldType::String),
            );
        SchemaRegistry::new().with_schema(ContentType::Block, schema)
    }

    #[test]
    fn test_unknown_content_type_aborts() {
        let registry = block_registry();
        let parser = ComponentParser::new(&registry);
        let err = parser
            .parse_tagged(&ItemDescription::new("Stone"), "fluid")
            .unwrap_err();
        assert_eq!(err, ParseError::UnknownContentType("fluid".into()));

        let err = parser
            .parse(&ItemDescription::new("Stone"), ContentType::Item)
            .unwrap_err();
        assert_eq!(err, ParseError::SchemaNotLoaded(ContentType::Item));
    }

    #[test]
    fn test_unknown_field_does_not_stop_siblings() {
        let registry = block_registry();
        let description = ItemDescription::new("Stone")
            .with_field("Glow", true)
            .with_field("Friction", 0.6)
            .with_field("LightEmission", 7);

        let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
        assert_eq!(outcome.tree.component("minecraft:friction"), Some(&json!(0.6)));
        assert_eq!(outcome.tree.component("minecraft:light_emission"), Some(&json!(7)));
        assert_eq!(
            outcome.diagnostics[0].kind,
            ValidationError::UnknownComponentType("Glow".into())
        );
        assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_reserved_keys_are_skipped() {
        let registry = block_registry();
        let description = ItemDescription::new("Stone")
            .with_field("init", json!(null))
            .with_field("Data", json!({}))
            .with_field("Component", json!([]))
            .with_field("reset", true);

        let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.tree.components.is_empty());
    }

    #[test]
    fn test_identity_fields_apply_in_order() {
        let registry = block_registry();
        let description = ItemDescription::new("Palm Log")
            .with_field("Namespace", "tropics")
            .with_field("Identifier", "Palm_Log")
            .with_field("Version", json!([1, 20, 0]))
            .with_field("IsHiddenInCommands", false)
            .with_field("Group", "itemGroup.name.log");

        let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
        assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
        assert_eq!(outcome.tree.identifier.as_deref(), Some("tropics:palm_log"));
        assert_eq!(outcome.tree.format_version.as_deref(), Some("1.20.0"));
        assert!(outcome.tree.components.is_empty());
    }

    #[test]
    fn test_identity_field_also_resolved_against_schema() {
        let registry = block_registry();
        let description = ItemDescription::new("Log").with_field("Category", "construction");

        let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(
            outcome.tree.component("menu_category"),
            Some(&json!("construction"))
        );
    }

    #[test]
    fn test_malformed_identity_only_skips_its_effect() {
        let registry = block_registry();
        let description = ItemDescription::new("Stone")
            .with_identifier("myaddon:stone")
            .with_field("Version", json!([1, 0]))
            .with_field("Namespace", 7)
            .with_field("LightEmission", 2.4);

        let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
        assert_eq!(outcome.tree.format_version, None);
        assert_eq!(outcome.tree.identifier.as_deref(), Some("myaddon:stone"));
        assert_eq!(outcome.tree.component("minecraft:light_emission"), Some(&json!(2)));

        let codes: Vec<&str> = outcome.diagnostics.iter().map(|d| d.kind.code()).collect();
        assert_eq!(codes, vec!["type_mismatch", "type_mismatch", "numeric_coerced"]);
        assert!(outcome.has_errors());
    }

    #[test]
    fn test_concurrent_parses_use_independent_trees() {
        let registry = block_registry();
        let parser = ComponentParser::new(&registry);

        let outcomes: Vec<ParseOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let parser = &parser;
                    scope.spawn(move || {
                        let description = ItemDescription::new(format!("Block{i}"))
                            .with_field("Namespace", "ns")
                            .with_field("LightEmission", i);
                        parser.parse(&description, ContentType::Block).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.tree.identifier, Some(format!("ns:block{i}")));
            assert_eq!(
                outcome.tree.component("minecraft:light_emission"),
                Some(&json!(i))
            );
            assert!(outcome.diagnostics.is_empty());
        }
    }
}

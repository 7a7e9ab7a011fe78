//! Read-only schema lookup by content type.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::types::{ComponentSchema, ContentType};

/// Schemas for each supported [`ContentType`].
///
/// Populated once at startup and only read while parsing, so a single
/// registry can be shared by reference across concurrent parses.
///
/// # Examples
///
/// ```
/// use content_schema_core::{ComponentSchema, ContentType, FieldSpec, FieldType, SchemaRegistry};
///
/// let registry = SchemaRegistry::new().with_schema(
///     ContentType::Block,
///     ComponentSchema::new().with_field("Friction", FieldSpec::new("minecraft:friction", FieldType::Float)),
/// );
/// assert!(registry.resolve(ContentType::Block).is_ok());
/// assert!(registry.resolve(ContentType::Item).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<ContentType, ComponentSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, content_type: ContentType, schema: ComponentSchema) -> Self {
        self.insert(content_type, schema);
        self
    }

    /// Inserts a schema, replacing any existing one for `content_type`.
    pub fn insert(
        &mut self,
        content_type: ContentType,
        schema: ComponentSchema,
    ) -> Option<ComponentSchema> {
        self.schemas.insert(content_type, schema)
    }

    pub fn get(&self, content_type: ContentType) -> Option<&ComponentSchema> {
        self.schemas.get(&content_type)
    }

    /// Returns the schema for `content_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::SchemaNotLoaded`] if no schema was registered.
    pub fn resolve(&self, content_type: ContentType) -> Result<&ComponentSchema, ParseError> {
        self.get(content_type)
            .ok_or(ParseError::SchemaNotLoaded(content_type))
    }

    pub fn contains(&self, content_type: ContentType) -> bool {
        self.schemas.contains_key(&content_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered content types in declaration order.
    pub fn content_types(&self) -> impl Iterator<Item = ContentType> + '_ {
        ContentType::ALL
            .into_iter()
            .filter(|ct| self.schemas.contains_key(ct))
    }

    /// Iterates over registered schemas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &ComponentSchema)> {
        ContentType::ALL
            .into_iter()
            .filter_map(|ct| self.schemas.get(&ct).map(|schema| (ct, schema)))
    }
}

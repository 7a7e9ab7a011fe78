//! Schemas embedded at build time.

use content_schema_core::{ComponentSchema, ContentType, SchemaRegistry};

use crate::error::Result;

const BLOCK: &str = include_str!("../schemas/block.json");
const ITEM: &str = include_str!("../schemas/item.json");
const ENTITY: &str = include_str!("../schemas/entity.json");
const RECIPE: &str = include_str!("../schemas/recipe.json");

/// Returns the embedded JSON source for `content_type`.
pub fn builtin_source(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Block => BLOCK,
        ContentType::Item => ITEM,
        ContentType::Entity => ENTITY,
        ContentType::Recipe => RECIPE,
    }
}

/// Parses the embedded schemas for every content type.
///
/// # Errors
///
/// Returns [`JsonError`](crate::LoaderError::JsonError) if an embedded schema
/// does not parse.
///
/// # Examples
///
/// ```
/// use content_schema_core::ContentType;
///
/// let registry = content_schema_db::builtin_registry().unwrap();
/// assert_eq!(registry.len(), 4);
/// assert!(registry.get(ContentType::Block).unwrap().contains("Flammable"));
/// ```
pub fn builtin_registry() -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for content_type in ContentType::ALL {
        let schema: ComponentSchema = serde_json::from_str(builtin_source(content_type))?;
        registry.insert(content_type, schema);
    }
    Ok(registry)
}

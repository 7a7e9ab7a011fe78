//! Schema-driven validation of authored content descriptions.
//!
//! Authors describe blocks, items, entities, and recipes as loosely-typed
//! key/value descriptions. This crate checks each description against the
//! field schema for its content type and produces a strictly-typed output
//! tree plus an ordered diagnostic trail:
//!
//! - [`ComponentSchema`]: per-content-type mapping from field name to a union
//!   of [`FieldSpec`] alternatives, each with a closed [`FieldType`].
//! - [`SchemaRegistry`]: read-only lookup of schemas by [`ContentType`].
//! - [`ComponentParser`]: walks an [`ItemDescription`] in authored order,
//!   applies [`IdentityField`] rewrites, and validates every other field.
//! - [`TypeParser`]: the recursive object, array, and numeric validators.
//! - [`AliasResolver`]: pluggable computed-alias strategies.
//! - [`Diagnostic`]: one non-halting validation outcome.
//!
//! Schema definitions themselves are checked with [`validate_schema`].
//!
//! # Example
//!
//! ```
//! use content_schema_core::*;
//! use serde_json::json;
//!
//! let schema: ComponentSchema = serde_json::from_value(json!({
//!     "LightEmission": { "name": "minecraft:light_emission", "type": "int" },
//!     "CollisionBox": {
//!         "name": "minecraft:collision_box",
//!         "type": "object",
//!         "properties": [
//!             { "name": "origin", "alias": "Origin", "type": "array", "maxItems": 4, "items": { "type": "float" } },
//!             { "name": "size", "alias": "Size", "type": "array", "maxItems": 4, "items": { "type": "float" } }
//!         ]
//!     }
//! })).unwrap();
//! let registry = SchemaRegistry::new().with_schema(ContentType::Block, schema);
//!
//! let description: ItemDescription = serde_json::from_value(json!({
//!     "name": "Slab",
//!     "fields": {
//!         "Namespace": "myaddon",
//!         "Version": [1, 20, 0],
//!         "LightEmission": 3.7,
//!         "CollisionBox": { "Origin": [-8, 0, -8], "Size": [16, 8, 16] }
//!     }
//! })).unwrap();
//!
//! let outcome = parse_component(&description, ContentType::Block, &registry).unwrap();
//! assert_eq!(outcome.tree.identifier.as_deref(), Some("myaddon:slab"));
//! assert_eq!(outcome.tree.format_version.as_deref(), Some("1.20.0"));
//! assert_eq!(outcome.tree.component("minecraft:light_emission"), Some(&json!(4)));
//! assert_eq!(
//!     outcome.tree.property("minecraft:collision_box", "size"),
//!     Some(&json!([16.0, 8.0, 16.0]))
//! );
//! assert!(!outcome.has_errors());
//! ```

mod alias;
mod component;
mod diagnostics;
mod error;
mod identity;
mod options;
mod parser;
mod registry;
mod types;
mod validate;

pub use alias::{
    AliasResolver, AliasStrategy, COMPUTED_ALIAS_MARKER, ComputedAlias, UpperCase, is_computed,
};
pub use component::{ComponentParser, ParseOutcome, parse_component};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ParseError, ValidationError};
pub use identity::{FORMAT_VERSION_PARTS, IdentityField};
pub use options::{MaxItemsPolicy, ValidationOptions};
pub use parser::{TypeParser, round_half_up};
pub use registry::SchemaRegistry;
pub use types::*;
pub use validate::{SchemaError, validate_registry, validate_schema};

//! Type definitions for content schemas, authored descriptions, and parse
//! output.
//!
//! A [`ComponentSchema`] maps each authorable field name to an ordered list of
//! [`FieldSpec`] alternatives (a union). Each alternative carries a closed
//! [`FieldType`] so that validation dispatches by pattern match rather than by
//! comparing type-name strings.
//!
//! All schema types serialize with [`serde`] so schemas can be stored as JSON
//! or YAML and embedded at build time.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Description keys that control how an item is built and are never
/// validated against a schema.
pub const RESERVED_KEYS: [&str; 4] = ["reset", "init", "Data", "Component"];

/// Closed set of authored content categories.
///
/// Selects which [`ComponentSchema`] applies to a description.
///
/// # Examples
///
/// ```
/// use content_schema_core::ContentType;
///
/// let block: ContentType = "block".parse().unwrap();
/// assert_eq!(block, ContentType::Block);
/// assert_eq!(block.root_key(), "minecraft:block");
/// assert!("fluid".parse::<ContentType>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Block,
    Item,
    Entity,
    Recipe,
}

impl ContentType {
    /// Every supported content type, in declaration order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Block,
        ContentType::Item,
        ContentType::Entity,
        ContentType::Recipe,
    ];

    /// Lowercase tag used on the command line and in schema file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Block => "block",
            ContentType::Item => "item",
            ContentType::Entity => "entity",
            ContentType::Recipe => "recipe",
        }
    }

    /// Document key under which a serializer nests this content type
    /// (e.g., `minecraft:block`).
    pub fn root_key(&self) -> String {
        format!("minecraft:{}", self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ParseError::UnknownContentType(s.to_string()))
    }
}

/// Runtime kind of an authored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a field.
///
/// Composite variants carry their nested structure. On the wire the variant
/// is selected by the `type` key:
///
/// ```json
/// { "name": "origin", "type": "array", "maxItems": 4, "items": { "type": "float" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    /// Any number; stored without coercion.
    Number,
    Boolean,
    /// Whole number; fractional input is rounded.
    Int,
    /// Fractional number; whole input is normalized to a float representation.
    Float,
    Object {
        #[serde(default)]
        properties: Vec<FieldSpec>,
    },
    Array {
        items: Box<FieldSpec>,
        #[serde(
            rename = "maxItems",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        max_items: Option<usize>,
    },
}

impl FieldType {
    /// Builds an object type from its properties.
    pub fn object(properties: Vec<FieldSpec>) -> Self {
        FieldType::Object { properties }
    }

    /// Builds an array type from its element spec and optional size limit.
    pub fn array(items: FieldSpec, max_items: Option<usize>) -> Self {
        FieldType::Array {
            items: Box::new(items),
            max_items,
        }
    }

    /// Schema tag of this type (`"int"`, `"object"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }

    /// Returns `true` if a value of runtime kind `kind` can be validated
    /// against this type. All numeric subtypes accept any number; coercion
    /// happens afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_schema_core::{FieldType, ValueKind};
    ///
    /// assert!(FieldType::Int.accepts(ValueKind::Number));
    /// assert!(!FieldType::Int.accepts(ValueKind::String));
    /// assert!(FieldType::object(vec![]).accepts(ValueKind::Object));
    /// ```
    pub fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (FieldType::String, ValueKind::String)
                | (FieldType::Boolean, ValueKind::Boolean)
                | (
                    FieldType::Number | FieldType::Int | FieldType::Float,
                    ValueKind::Number
                )
                | (FieldType::Object { .. }, ValueKind::Object)
                | (FieldType::Array { .. }, ValueKind::Array)
        )
    }

    /// Returns `true` for the subtypes handled by numeric coercion.
    pub fn is_numeric_subtype(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Float)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One declared field or object property.
///
/// `name` is the output key; `alias` is the key read from authored input and
/// defaults to `name`.
///
/// # Examples
///
/// ```
/// use content_schema_core::{FieldSpec, FieldType};
///
/// let spec = FieldSpec::new("catch_chance_modifier", FieldType::Int)
///     .with_alias("CatchChanceModifier")
///     .with_default(5);
/// assert_eq!(spec.alias(), "CatchChanceModifier");
/// assert_eq!(spec.default, Some(5.into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Output key. May be empty for array element specs.
    #[serde(default)]
    pub name: String,
    /// Input key when it differs from `name`. May be a computed alias such as
    /// `$UPPER_CASE(Family)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(flatten)]
    pub kind: FieldType,
    /// Fallback written when no value is produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind,
            default: None,
            description: None,
        }
    }

    /// Spec for an array element (no name of its own).
    pub fn element(kind: FieldType) -> Self {
        Self::new("", kind)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Key read from authored input.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AlternativesRepr {
    Many(Vec<FieldSpec>),
    One(Box<FieldSpec>),
}

impl AlternativesRepr {
    fn into_vec(self) -> Vec<FieldSpec> {
        match self {
            AlternativesRepr::Many(specs) => specs,
            AlternativesRepr::One(spec) => vec![*spec],
        }
    }
}

/// Field schema for one content type.
///
/// Maps each authorable field name to its ordered union of alternatives. On
/// the wire a field may be given as a single spec object or as a list.
///
/// # Examples
///
/// ```
/// use content_schema_core::{ComponentSchema, FieldSpec, FieldType};
///
/// let schema: ComponentSchema = serde_json::from_str(r#"{
///     "Friction": { "name": "minecraft:friction", "type": "float", "default": 0.4 },
///     "DestroyTime": [
///         { "name": "minecraft:destructible_by_mining", "type": "boolean" },
///         { "name": "minecraft:destructible_by_mining", "type": "object", "properties": [
///             { "name": "seconds_to_destroy", "alias": "SecondsToDestroy", "type": "float" }
///         ] }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(schema.alternatives("Friction").unwrap().len(), 1);
/// assert_eq!(schema.alternatives("DestroyTime").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComponentSchema {
    fields: BTreeMap<String, Vec<FieldSpec>>,
}

impl<'de> Deserialize<'de> for ComponentSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, AlternativesRepr>::deserialize(deserializer)?;
        Ok(Self {
            fields: raw
                .into_iter()
                .map(|(name, alternatives)| (name, alternatives.into_vec()))
                .collect(),
        })
    }
}

impl ComponentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alternative to the union declared for `field`.
    pub fn with_field(mut self, field: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.entry(field.into()).or_default().push(spec);
        self
    }

    /// Replaces the union declared for `field`.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        alternatives: Vec<FieldSpec>,
    ) -> Option<Vec<FieldSpec>> {
        self.fields.insert(field.into(), alternatives)
    }

    /// Returns the alternatives declared for `field`, in declaration order.
    pub fn alternatives(&self, field: &str) -> Option<&[FieldSpec]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, alternatives)` sorted by field name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[FieldSpec])> {
        self.fields
            .iter()
            .map(|(name, alternatives)| (name.as_str(), alternatives.as_slice()))
    }
}

/// Author input for one content item.
///
/// `fields` keeps the authored key order; fields are processed in that order.
///
/// # Examples
///
/// ```
/// use content_schema_core::ItemDescription;
///
/// let desc: ItemDescription = serde_json::from_str(r#"{
///     "name": "Stone",
///     "fields": { "Namespace": "myaddon", "Friction": 0.6 }
/// }"#).unwrap();
/// assert_eq!(desc.fields.keys().next().map(String::as_str), Some("Namespace"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDescription {
    /// Display name; used as the diagnostic subject and identifier stem.
    pub name: String,
    /// Identifier already assigned to the item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl ItemDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            fields: Map::new(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Validated output for one description.
///
/// `components` maps component name to its resolved value. A field that
/// failed validation has no entry unless a default applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub components: Map<String, Value>,
}

impl OutputTree {
    /// Looks up a resolved component value.
    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }

    /// Looks up one property of an object-valued component.
    pub fn property(&self, component: &str, property: &str) -> Option<&Value> {
        self.components.get(component)?.get(property)
    }

    /// Renders the tree as an add-on document nested under
    /// [`ContentType::root_key`]:
    ///
    /// ```json
    /// {
    ///   "format_version": "1.20.0",
    ///   "minecraft:block": {
    ///     "description": { "identifier": "myaddon:stone" },
    ///     "components": { "minecraft:friction": 0.6 }
    ///   }
    /// }
    /// ```
    pub fn to_document(&self, content_type: ContentType) -> Value {
        let mut description = Map::new();
        if let Some(identifier) = &self.identifier {
            description.insert("identifier".to_string(), Value::String(identifier.clone()));
        }

        let mut body = Map::new();
        body.insert("description".to_string(), Value::Object(description));
        body.insert("components".to_string(), Value::Object(self.components.clone()));

        let mut document = Map::new();
        if let Some(version) = &self.format_version {
            document.insert("format_version".to_string(), Value::String(version.clone()));
        }
        document.insert(content_type.root_key(), Value::Object(body));
        Value::Object(document)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_content_type_parse_is_case_insensitive() {
        assert_eq!("Block".parse::<ContentType>().unwrap(), ContentType::Block);
        assert_eq!(" recipe ".parse::<ContentType>().unwrap(), ContentType::Recipe);
        assert_eq!(
            "fluid".parse::<ContentType>(),
            Err(ParseError::UnknownContentType("fluid".to_string()))
        );
    }

    #[test]
    fn test_field_spec_deserializes_nested_array() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "name": "grid",
            "type": "array",
            "maxItems": 4,
            "items": { "type": "array", "items": { "type": "int" } }
        }))
        .unwrap();

        assert_eq!(spec.alias(), "grid");
        let FieldType::Array { items, max_items } = &spec.kind else {
            panic!("expected array, got {:?}", spec.kind);
        };
        assert_eq!(*max_items, Some(4));
        assert!(matches!(items.kind, FieldType::Array { max_items: None, .. }));
    }

    #[test]
    fn test_field_spec_roundtrips_through_json() {
        let spec = FieldSpec::new(
            "minecraft:flammable",
            FieldType::object(vec![
                FieldSpec::new("catch_chance_modifier", FieldType::Int)
                    .with_alias("CatchChanceModifier")
                    .with_default(5),
            ]),
        );
        let raw = serde_json::to_value(&spec).unwrap();
        assert_eq!(raw["type"], "object");
        assert_eq!(raw["properties"][0]["alias"], "CatchChanceModifier");

        let back: FieldSpec = serde_json::from_value(raw).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_unknown_field_type_is_rejected() {
        let result = serde_json::from_value::<FieldSpec>(json!({ "name": "x", "type": "vector" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_component_schema_accepts_single_spec_or_union() {
        let schema: ComponentSchema = serde_json::from_value(json!({
            "Glint": { "name": "minecraft:glint", "type": "boolean" },
            "Icon": [
                { "name": "minecraft:icon", "type": "string" },
                { "name": "minecraft:icon", "type": "object", "properties": [] }
            ]
        }))
        .unwrap();

        assert_eq!(schema.len(), 2);
        let icon = schema.alternatives("Icon").unwrap();
        assert_eq!(icon[0].kind, FieldType::String);
        assert_eq!(icon[1].kind.type_name(), "object");
        assert!(schema.alternatives("Missing").is_none());
    }

    #[test]
    fn test_item_description_preserves_field_order() {
        let desc: ItemDescription = serde_json::from_str(
            r#"{"name":"Log","fields":{"Version":[1,20,0],"Namespace":"wood","Friction":0.5}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = desc.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Version", "Namespace", "Friction"]);
    }

    #[test]
    fn test_output_tree_property_lookup() {
        let mut tree = OutputTree::default();
        tree.components.insert(
            "minecraft:flammable".into(),
            json!({ "catch_chance_modifier": 20 }),
        );
        assert_eq!(
            tree.property("minecraft:flammable", "catch_chance_modifier"),
            Some(&json!(20))
        );
        assert!(tree.property("minecraft:flammable", "missing").is_none());
        assert!(tree.component("minecraft:friction").is_none());
    }

    #[test]
    fn test_output_tree_document_nests_under_root_key() {
        let mut tree = OutputTree {
            format_version: Some("1.20.0".into()),
            identifier: Some("myaddon:torch".into()),
            ..OutputTree::default()
        };
        tree.components.insert("priority".into(), json!(2));

        assert_eq!(
            tree.to_document(ContentType::Recipe),
            json!({
                "format_version": "1.20.0",
                "minecraft:recipe": {
                    "description": { "identifier": "myaddon:torch" },
                    "components": { "priority": 2 }
                }
            })
        );
        assert_eq!(
            OutputTree::default().to_document(ContentType::Item),
            json!({ "minecraft:item": { "description": {}, "components": {} } })
        );
    }
}

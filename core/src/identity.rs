//! Identity fields: reserved description keys that rewrite the item's
//! identifier or format version instead of (or in addition to) producing a
//! component.

use std::fmt;

use serde_json::Value;
use tracing::trace;

use crate::error::ValidationError;
use crate::types::{OutputTree, ValueKind};

/// Number of dot-separated parts in a format version.
pub const FORMAT_VERSION_PARTS: usize = 3;

/// Reserved description keys with bespoke handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    /// `cv` → identifier `cv:<lowercased display name>`.
    Namespace,
    /// Three-element sequence → `format_version` `a.b.c`.
    Version,
    /// `cv` → replaces the name segment of the current identifier.
    Identifier,
    IsHiddenInCommands,
    Group,
    Category,
}

impl IdentityField {
    pub const ALL: [IdentityField; 6] = [
        IdentityField::Namespace,
        IdentityField::Version,
        IdentityField::Identifier,
        IdentityField::IsHiddenInCommands,
        IdentityField::Group,
        IdentityField::Category,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        IdentityField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Namespace => "Namespace",
            IdentityField::Version => "Version",
            IdentityField::Identifier => "Identifier",
            IdentityField::IsHiddenInCommands => "IsHiddenInCommands",
            IdentityField::Group => "Group",
            IdentityField::Category => "Category",
        }
    }

    /// Applies this field's effect to `tree`.
    ///
    /// # Errors
    ///
    /// Returns the diagnostic to record when `value` is malformed or the
    /// effect cannot be applied; `tree` is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_schema_core::{IdentityField, OutputTree};
    /// use serde_json::json;
    ///
    /// let mut tree = OutputTree::default();
    /// IdentityField::Namespace.apply(&json!("myaddon"), "Stone", &mut tree).unwrap();
    /// assert_eq!(tree.identifier.as_deref(), Some("myaddon:stone"));
    ///
    /// IdentityField::Version.apply(&json!([1, 0, 2]), "Stone", &mut tree).unwrap();
    /// assert_eq!(tree.format_version.as_deref(), Some("1.0.2"));
    /// ```
    pub fn apply(
        self,
        value: &Value,
        display_name: &str,
        tree: &mut OutputTree,
    ) -> Result<(), ValidationError> {
        match self {
            IdentityField::Namespace => {
                let namespace = self.expect_string(value)?;
                tree.identifier = Some(format!("{namespace}:{}", display_name.to_lowercase()));
            }
            IdentityField::Version => {
                tree.format_version = Some(self.format_version(value)?);
            }
            IdentityField::Identifier => {
                let name = self.expect_string(value)?.to_lowercase();
                let current = tree
                    .identifier
                    .as_deref()
                    .ok_or_else(|| ValidationError::InvalidIdentity {
                        field: self.as_str(),
                        reason: "item has no identifier to rename; set Namespace first"
                            .to_string(),
                    })?;
                let renamed = {
                    let mut segments: Vec<&str> = current.split(':').collect();
                    if segments.len() < 2 {
                        segments.push(name.as_str());
                    } else {
                        segments[1] = name.as_str();
                    }
                    segments.join(":")
                };
                tree.identifier = Some(renamed);
            }
            IdentityField::IsHiddenInCommands => {
                if !value.is_boolean() {
                    return Err(self.mismatch("boolean", ValueKind::of(value).to_string()));
                }
            }
            IdentityField::Group | IdentityField::Category => {
                trace!(field = self.as_str(), "Identity field accepted without transform");
            }
        }
        Ok(())
    }

    fn expect_string<'v>(&self, value: &'v Value) -> Result<&'v str, ValidationError> {
        value
            .as_str()
            .ok_or_else(|| self.mismatch("string", ValueKind::of(value).to_string()))
    }

    fn format_version(&self, value: &Value) -> Result<String, ValidationError> {
        let expected = "array of length 3";
        let parts = match value {
            Value::Array(parts) if parts.len() == FORMAT_VERSION_PARTS => parts,
            Value::Array(parts) => {
                return Err(self.mismatch(expected, format!("array of length {}", parts.len())));
            }
            other => return Err(self.mismatch(expected, ValueKind::of(other).to_string())),
        };
        let rendered = parts
            .iter()
            .map(|part| match part {
                Value::Number(n) => Ok(version_part(n)),
                Value::String(s) => Ok(s.clone()),
                other => Err(self.mismatch(
                    "array of numbers or strings",
                    format!("{} element", ValueKind::of(other)),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join("."))
    }

    fn mismatch(&self, expected: &str, found: String) -> ValidationError {
        ValidationError::TypeMismatch {
            field: self.as_str().to_string(),
            expected: expected.to_string(),
            found,
        }
    }
}

/// Renders whole floats without a fractional part, so `1.0` joins as `1`.
fn version_part(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(raw) if n.is_f64() && raw.fract() == 0.0 && raw.abs() < 1e15 => {
            format!("{}", raw as i64)
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tree_with_identifier(identifier: &str) -> OutputTree {
        OutputTree {
            identifier: Some(identifier.to_string()),
            ..OutputTree::default()
        }
    }

    #[test]
    fn test_from_name_matches_exact_keys() {
        assert_eq!(IdentityField::from_name("Namespace"), Some(IdentityField::Namespace));
        assert_eq!(
            IdentityField::from_name("IsHiddenInCommands"),
            Some(IdentityField::IsHiddenInCommands)
        );
        assert_eq!(IdentityField::from_name("namespace"), None);
        assert_eq!(IdentityField::from_name("Friction"), None);
    }

    #[test]
    fn test_namespace_lowercases_display_name() {
        let mut tree = OutputTree::default();
        IdentityField::Namespace
            .apply(&json!("myaddon"), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree.identifier.as_deref(), Some("myaddon:stone"));
    }

    #[test]
    fn test_namespace_requires_string() {
        let mut tree = tree_with_identifier("old:stone");
        let err = IdentityField::Namespace
            .apply(&json!(42), "Stone", &mut tree)
            .unwrap_err();
        assert_eq!(err.code(), "type_mismatch");
        assert_eq!(tree.identifier.as_deref(), Some("old:stone"));
    }

    #[test]
    fn test_version_requires_three_parts() {
        let mut tree = OutputTree::default();
        let err = IdentityField::Version
            .apply(&json!([1, 0]), "Stone", &mut tree)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field: "Version".into(),
                expected: "array of length 3".into(),
                found: "array of length 2".into(),
            }
        );
        assert_eq!(tree.format_version, None);

        assert!(IdentityField::Version
            .apply(&json!("1.0.2"), "Stone", &mut tree)
            .is_err());
        assert!(IdentityField::Version
            .apply(&json!([1, null, 2]), "Stone", &mut tree)
            .is_err());
        assert_eq!(tree.format_version, None);
    }

    #[test]
    fn test_version_joins_parts() {
        let mut tree = OutputTree::default();
        IdentityField::Version
            .apply(&json!([1, 20, "50"]), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree.format_version.as_deref(), Some("1.20.50"));
    }

    #[test]
    fn test_version_renders_whole_floats_as_integers() {
        let mut tree = OutputTree::default();
        IdentityField::Version
            .apply(&json!([1.0, 20, 0]), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree.format_version.as_deref(), Some("1.20.0"));
    }

    #[test]
    fn test_identifier_replaces_name_segment() {
        let mut tree = tree_with_identifier("myaddon:old_name");
        IdentityField::Identifier
            .apply(&json!("NewName"), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree.identifier.as_deref(), Some("myaddon:newname"));
    }

    #[test]
    fn test_identifier_without_name_segment_appends() {
        let mut tree = tree_with_identifier("myaddon");
        IdentityField::Identifier
            .apply(&json!("Rock"), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree.identifier.as_deref(), Some("myaddon:rock"));
    }

    #[test]
    fn test_identifier_needs_existing_identifier() {
        let mut tree = OutputTree::default();
        let err = IdentityField::Identifier
            .apply(&json!("Rock"), "Stone", &mut tree)
            .unwrap_err();
        assert_eq!(err.code(), "invalid_identity");
        assert_eq!(tree.identifier, None);
    }

    #[test]
    fn test_hidden_in_commands_is_validated_only() {
        let mut tree = OutputTree::default();
        IdentityField::IsHiddenInCommands
            .apply(&json!(true), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree, OutputTree::default());
        assert!(IdentityField::IsHiddenInCommands
            .apply(&json!("yes"), "Stone", &mut tree)
            .is_err());
    }

    #[test]
    fn test_group_and_category_accept_anything() {
        let mut tree = OutputTree::default();
        IdentityField::Group
            .apply(&json!("itemGroup.name.log"), "Stone", &mut tree)
            .unwrap();
        IdentityField::Category
            .apply(&json!(3), "Stone", &mut tree)
            .unwrap();
        assert_eq!(tree, OutputTree::default());
    }
}

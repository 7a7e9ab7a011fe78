//! Error types for description parsing.
//!
//! [`ValidationError`] is the field-level taxonomy recorded as diagnostics;
//! none of its variants stop a parse. [`ParseError`] covers the structural
//! failures that abort a parse before any field is visited.

use thiserror::Error;

use crate::diagnostics::Severity;
use crate::types::{ContentType, ValueKind};

/// Field-level validation outcomes.
///
/// Each variant has a fixed [`Severity`] (see
/// [`severity`](ValidationError::severity)). The `Display` impl provides the
/// human-readable message carried by a [`Diagnostic`](crate::Diagnostic).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Description field is neither an identity field nor declared in the
    /// schema.
    #[error("unknown component data type: {0}")]
    UnknownComponentType(String),
    /// Value's runtime type does not satisfy any declared type.
    #[error("expected value of {field} to be type {expected}, instead found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// Declared property is absent and has no default.
    #[error("expected {field} to have a value with the type {expected}")]
    MissingRequiredValue {
        field: String,
        expected: &'static str,
    },
    /// Input key is not declared by the object's schema.
    #[error("{object} contains unknown property: {property}")]
    UnknownProperty { object: String, property: String },
    /// Object declares more properties than the input provides.
    #[error("mismatch in properties for {object}: {declared} declared, {present} present")]
    PropertyCountMismatch {
        object: String,
        declared: usize,
        present: usize,
    },
    #[error("expected {field} to have fewer than {max_items} elements, instead got {length}")]
    ArrayLengthExceeded {
        field: String,
        max_items: usize,
        length: usize,
    },
    #[error("expected {field} elements to be type {expected}[], instead got {found}[]")]
    ArrayElementTypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
    #[error("unsupported array type for {field}: {element_type}")]
    UnsupportedArrayType {
        field: String,
        element_type: &'static str,
    },
    #[error("unsupported numeric type for {field}: {declared}")]
    UnsupportedNumericType {
        field: String,
        declared: &'static str,
    },
    #[error("expected array for value of {field}, instead found {found}")]
    NotAnArray { field: String, found: ValueKind },
    /// Number was normalized to its declared subtype.
    #[error("expected {field} to be type {expected}, instead got {found}")]
    NumericCoerced {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("using default value for {0}")]
    DefaultApplied(String),
    /// Identity field was well-typed but its effect could not be applied.
    #[error("cannot apply {field}: {reason}")]
    InvalidIdentity { field: &'static str, reason: String },
}

impl ValidationError {
    /// Severity recorded when this outcome is reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_schema_core::{Severity, ValidationError};
    ///
    /// let unknown = ValidationError::UnknownComponentType("Glow".into());
    /// assert_eq!(unknown.severity(), Severity::Warning);
    ///
    /// let missing = ValidationError::MissingRequiredValue { field: "Size".into(), expected: "array" };
    /// assert_eq!(missing.severity(), Severity::Error);
    /// ```
    pub fn severity(&self) -> Severity {
        match self {
            ValidationError::UnknownComponentType(_)
            | ValidationError::UnknownProperty { .. }
            | ValidationError::NumericCoerced { .. }
            | ValidationError::DefaultApplied(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnknownComponentType(_) => "unknown_component_type",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::MissingRequiredValue { .. } => "missing_required_value",
            ValidationError::UnknownProperty { .. } => "unknown_property",
            ValidationError::PropertyCountMismatch { .. } => "property_count_mismatch",
            ValidationError::ArrayLengthExceeded { .. } => "array_length_exceeded",
            ValidationError::ArrayElementTypeMismatch { .. } => "array_element_type_mismatch",
            ValidationError::UnsupportedArrayType { .. } => "unsupported_array_type",
            ValidationError::UnsupportedNumericType { .. } => "unsupported_numeric_type",
            ValidationError::NotAnArray { .. } => "not_an_array",
            ValidationError::NumericCoerced { .. } => "numeric_coerced",
            ValidationError::DefaultApplied(_) => "default_applied",
            ValidationError::InvalidIdentity { .. } => "invalid_identity",
        }
    }
}

/// Failures that abort a whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Content type tag is not one of `block`, `item`, `entity`, `recipe`.
    #[error("unknown component type: {0}")]
    UnknownContentType(String),
    /// Registry has no schema for a supported content type.
    #[error("no schema loaded for content type: {0}")]
    SchemaNotLoaded(ContentType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ValidationError::ArrayLengthExceeded {
            field: "minecraft:collision_box.origin".into(),
            max_items: 3,
            length: 3,
        };
        assert_eq!(
            err.to_string(),
            "expected minecraft:collision_box.origin to have fewer than 3 elements, instead got 3"
        );
        assert_eq!(err.code(), "array_length_exceeded");
    }

    #[test]
    fn test_coercion_notices_are_warnings() {
        let coerced = ValidationError::NumericCoerced {
            field: "minecraft:light_emission".into(),
            expected: "int",
            found: "float",
        };
        assert_eq!(coerced.severity(), Severity::Warning);
        assert_eq!(
            ValidationError::DefaultApplied("minecraft:friction".into()).severity(),
            Severity::Warning
        );
        assert_eq!(
            ValidationError::NotAnArray {
                field: "size".into(),
                found: ValueKind::String
            }
            .severity(),
            Severity::Error
        );
    }
}

//! Diagnostic records collected during a parse.
//!
//! Diagnostics are returned as data alongside the output tree. Each recorded
//! entry is also mirrored as a `tracing` event so hosts that install a
//! subscriber see the trail as it happens.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ValidationError;

/// Severity of a [`Diagnostic`]. Orders `Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One validation outcome for a named item.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Display name of the item being parsed.
    pub subject: String,
    pub kind: ValidationError,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: <{}> {}", self.severity, self.subject, self.kind)
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 4)?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("subject", &self.subject)?;
        state.serialize_field("code", self.kind.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Ordered diagnostic collector for a single parse.
///
/// # Examples
///
/// ```
/// use content_schema_core::{Diagnostics, Severity, ValidationError};
///
/// let mut diagnostics = Diagnostics::new("Stone");
/// diagnostics.report(ValidationError::UnknownComponentType("Glow".into()));
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics.entries()[0].severity, Severity::Warning);
/// assert!(!diagnostics.has_errors());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    subject: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            entries: Vec::new(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Records `kind` at its default severity.
    pub fn report(&mut self, kind: ValidationError) {
        let severity = kind.severity();
        self.report_with(severity, kind);
    }

    /// Records `kind` at an explicit severity.
    pub fn report_with(&mut self, severity: Severity, kind: ValidationError) {
        match severity {
            Severity::Error => {
                warn!(subject = %self.subject, code = kind.code(), "{kind}");
            }
            Severity::Warning => {
                debug!(subject = %self.subject, code = kind.code(), "{kind}");
            }
        }
        self.entries.push(Diagnostic {
            severity,
            subject: self.subject.clone(),
            kind,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_uses_variant_severity_and_subject() {
        let mut diagnostics = Diagnostics::new("Palm Log");
        diagnostics.report(ValidationError::DefaultApplied("minecraft:friction".into()));
        diagnostics.report(ValidationError::MissingRequiredValue {
            field: "minecraft:geometry.identifier".into(),
            expected: "string",
        });

        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.count(Severity::Error), 1);
        assert!(diagnostics.has_errors());
        assert!(diagnostics.entries().iter().all(|d| d.subject == "Palm Log"));
    }

    #[test]
    fn test_display_includes_subject_marker() {
        let mut diagnostics = Diagnostics::new("Stone");
        diagnostics.report(ValidationError::UnknownComponentType("Glow".into()));
        assert_eq!(
            diagnostics.entries()[0].to_string(),
            "warning: <Stone> unknown component data type: Glow"
        );
    }

    #[test]
    fn test_serializes_code_and_message() {
        let mut diagnostics = Diagnostics::new("Stone");
        diagnostics.report_with(
            Severity::Error,
            ValidationError::UnknownComponentType("Glow".into()),
        );
        let raw = serde_json::to_value(&diagnostics.into_vec()[0]).unwrap();
        assert_eq!(raw["severity"], "error");
        assert_eq!(raw["subject"], "Stone");
        assert_eq!(raw["code"], "unknown_component_type");
        assert_eq!(raw["message"], "unknown component data type: Glow");
    }
}

use serde_json::{Map, Value};

use super::TypeParser;
use crate::alias::is_computed;
use crate::error::ValidationError;
use crate::types::{FieldSpec, ValueKind};

impl TypeParser<'_> {
    /// Validates a nested object against its declared properties.
    ///
    /// Computed aliases are resolved first. Undeclared input keys are reported
    /// but do not stop validation. If fewer keys are present than properties
    /// are read from input, the object is treated as malformed and nothing is
    /// returned. Otherwise each property independently yields its value, its
    /// default, or a diagnostic.
    pub fn parse_object(
        &mut self,
        object: &str,
        value: &Map<String, Value>,
        properties: &[FieldSpec],
    ) -> Option<Map<String, Value>> {
        let computed: Vec<Option<Value>> = properties
            .iter()
            .map(|property| {
                if is_computed(property.alias()) {
                    self.aliases.resolve(property.alias(), value)
                } else {
                    None
                }
            })
            .collect();

        for key in value.keys() {
            let declared = properties
                .iter()
                .any(|property| !is_computed(property.alias()) && property.alias() == key);
            if !declared {
                self.diagnostics.report(ValidationError::UnknownProperty {
                    object: object.to_string(),
                    property: key.clone(),
                });
            }
        }

        let declared = properties
            .iter()
            .filter(|property| !is_computed(property.alias()))
            .count();
        if declared > value.len() {
            self.diagnostics
                .report(ValidationError::PropertyCountMismatch {
                    object: object.to_string(),
                    declared,
                    present: value.len(),
                });
            return None;
        }

        let mut out = Map::new();
        for (property, computed) in properties.iter().zip(&computed) {
            let label = format!("{object}.{}", property.alias());
            let raw = if is_computed(property.alias()) {
                computed.as_ref()
            } else {
                value.get(property.alias())
            };

            match raw {
                Some(raw) => {
                    let kind = ValueKind::of(raw);
                    if !property.kind.accepts(kind) {
                        self.diagnostics.report(ValidationError::TypeMismatch {
                            field: label,
                            expected: property.kind.type_name().to_string(),
                            found: kind.to_string(),
                        });
                        continue;
                    }
                    if let Some(parsed) = self.parse_value(property, &label, raw) {
                        out.insert(property.name.clone(), parsed);
                    }
                }
                None => match &property.default {
                    Some(default) => {
                        out.insert(property.name.clone(), default.clone());
                    }
                    None => {
                        self.diagnostics
                            .report(ValidationError::MissingRequiredValue {
                                field: label,
                                expected: property.kind.type_name(),
                            });
                    }
                },
            }
        }
        Some(out)
    }
}

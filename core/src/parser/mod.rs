//! Recursive, schema-driven value validation.
//!
//! [`TypeParser`] carries the per-parse context (options, alias strategies,
//! diagnostic collector) through the numeric, array, and object validators.
//! Every validator returns `Some(value)` for the value to write, or `None`
//! after recording why nothing should be written.

mod array;
mod numeric;
mod object;

use serde_json::{Map, Value};
use tracing::trace;

use crate::alias::AliasResolver;
use crate::diagnostics::Diagnostics;
use crate::error::ValidationError;
use crate::options::ValidationOptions;
use crate::types::{FieldSpec, FieldType, ValueKind};

pub use numeric::round_half_up;

/// Validation context for one description.
pub struct TypeParser<'a> {
    options: &'a ValidationOptions,
    aliases: &'a AliasResolver,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> TypeParser<'a> {
    pub fn new(
        options: &'a ValidationOptions,
        aliases: &'a AliasResolver,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            options,
            aliases,
            diagnostics,
        }
    }

    /// Resolves one description field against its union of alternatives and
    /// writes the outcome into `out`.
    ///
    /// The first alternative whose declared type accepts the value's runtime
    /// type is used; earlier mismatches are silent. `TypeMismatch` is recorded
    /// only once every alternative has been tried. If nothing was written and
    /// an alternative declares a default, the default is written with a
    /// warning.
    pub fn parse_field(
        &mut self,
        field: &str,
        value: &Value,
        alternatives: &[FieldSpec],
        out: &mut Map<String, Value>,
    ) {
        let kind = ValueKind::of(value);
        let selected = alternatives.iter().find(|spec| spec.kind.accepts(kind));

        let mut written = false;
        match selected {
            Some(spec) => {
                let key = output_key(spec, field);
                trace!(field, alternative = spec.kind.type_name(), "Selected alternative");
                if let Some(parsed) = self.parse_value(spec, key, value) {
                    out.insert(key.to_string(), parsed);
                    written = true;
                }
            }
            None if !alternatives.is_empty() => {
                let expected = alternatives
                    .iter()
                    .map(|spec| spec.kind.type_name())
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.diagnostics.report(ValidationError::TypeMismatch {
                    field: field.to_string(),
                    expected,
                    found: kind.to_string(),
                });
            }
            None => {}
        }

        if written {
            return;
        }
        let fallback = selected
            .filter(|spec| spec.default.is_some())
            .or_else(|| alternatives.iter().find(|spec| spec.default.is_some()));
        if let Some(spec) = fallback {
            if let Some(default) = &spec.default {
                let key = output_key(spec, field);
                out.insert(key.to_string(), default.clone());
                self.diagnostics
                    .report(ValidationError::DefaultApplied(key.to_string()));
            }
        }
    }

    /// Validates a value already known to satisfy `spec`'s runtime type and
    /// returns what to write. `label` names the value in diagnostics.
    pub fn parse_value(&mut self, spec: &FieldSpec, label: &str, value: &Value) -> Option<Value> {
        match (&spec.kind, value) {
            (FieldType::Object { properties }, Value::Object(map)) => self
                .parse_object(label, map, properties)
                .map(Value::Object),
            (FieldType::Array { items, max_items }, _) => {
                self.parse_array(label, value, items, *max_items)
            }
            (FieldType::Int | FieldType::Float, Value::Number(number)) => {
                self.parse_nums(label, number, &spec.kind)
            }
            // `number` values are stored as authored, like strings and booleans.
            _ => Some(value.clone()),
        }
    }
}

fn output_key<'s>(spec: &'s FieldSpec, field: &'s str) -> &'s str {
    if spec.name.is_empty() {
        field
    } else {
        &spec.name
    }
}

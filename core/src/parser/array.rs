use serde_json::Value;

use super::TypeParser;
use crate::error::ValidationError;
use crate::types::{FieldSpec, FieldType, ValueKind};

impl TypeParser<'_> {
    /// Validates a sequence against its element spec.
    ///
    /// Checks the length bound, then element homogeneity, then dispatches on
    /// the element type: objects are validated element-wise, nested arrays
    /// recurse, and `int`/`float` elements are coerced in place. Any other
    /// element type is unsupported. A failure at any step aborts the whole
    /// field.
    pub fn parse_array(
        &mut self,
        field: &str,
        value: &Value,
        items: &FieldSpec,
        max_items: Option<usize>,
    ) -> Option<Value> {
        let Value::Array(elements) = value else {
            self.diagnostics.report(ValidationError::NotAnArray {
                field: field.to_string(),
                found: ValueKind::of(value),
            });
            return None;
        };

        if let Some(max_items) = max_items {
            if self.options.max_items.exceeds(elements.len(), max_items) {
                self.diagnostics
                    .report(ValidationError::ArrayLengthExceeded {
                        field: field.to_string(),
                        max_items,
                        length: elements.len(),
                    });
                return None;
            }
        }

        if !elements
            .iter()
            .all(|element| items.kind.accepts(ValueKind::of(element)))
        {
            self.diagnostics
                .report(ValidationError::ArrayElementTypeMismatch {
                    field: field.to_string(),
                    expected: items.kind.type_name(),
                    found: element_kinds(elements),
                });
            return None;
        }

        match &items.kind {
            FieldType::Object { properties } => {
                let parsed = elements
                    .iter()
                    .map(|element| match element {
                        Value::Object(map) => self
                            .parse_object(field, map, properties)
                            .map(Value::Object)
                            .unwrap_or_else(|| element.clone()),
                        _ => element.clone(),
                    })
                    .collect();
                Some(Value::Array(parsed))
            }
            FieldType::Array {
                items: inner,
                max_items: inner_max,
            } => {
                let mut parsed = Vec::with_capacity(elements.len());
                for element in elements {
                    parsed.push(self.parse_array(field, element, inner, *inner_max)?);
                }
                Some(Value::Array(parsed))
            }
            FieldType::Int | FieldType::Float => {
                let mut parsed = Vec::with_capacity(elements.len());
                for element in elements {
                    let Value::Number(number) = element else {
                        return None;
                    };
                    parsed.push(self.parse_nums(field, number, &items.kind)?);
                }
                Some(Value::Array(parsed))
            }
            other => {
                self.diagnostics
                    .report(ValidationError::UnsupportedArrayType {
                        field: field.to_string(),
                        element_type: other.type_name(),
                    });
                None
            }
        }
    }
}

/// Element type of a sequence for diagnostics: the shared kind, or `mixed`.
fn element_kinds(elements: &[Value]) -> String {
    let mut kinds = elements.iter().map(ValueKind::of);
    let Some(first) = kinds.next() else {
        return "empty".to_string();
    };
    if kinds.all(|kind| kind == first) {
        first.to_string()
    } else {
        "mixed".to_string()
    }
}

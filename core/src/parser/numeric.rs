use serde_json::{Number, Value};

use super::TypeParser;
use crate::error::ValidationError;
use crate::types::FieldType;

/// Decimal digits kept when an integral value is re-expressed as a float.
const FLOAT_PRECISION: usize = 10;

impl TypeParser<'_> {
    /// Normalizes a number to its declared numeric subtype.
    ///
    /// `int` rounds fractional input; `float` re-expresses integral input as a
    /// float. Both record a warning when they change the value's form. Any
    /// other declared type is unsupported and yields `None`, which callers
    /// treat as "nothing written".
    pub fn parse_nums(&mut self, field: &str, value: &Number, declared: &FieldType) -> Option<Value> {
        match declared {
            FieldType::Int => {
                if value.is_i64() || value.is_u64() {
                    return Some(Value::Number(value.clone()));
                }
                let raw = value.as_f64()?;
                if raw.fract() == 0.0 {
                    return Some(whole_number(raw));
                }
                self.diagnostics.report(ValidationError::NumericCoerced {
                    field: field.to_string(),
                    expected: "int",
                    found: "float",
                });
                Some(whole_number(round_half_up(raw)))
            }
            FieldType::Float => {
                if value.is_f64() && value.as_f64().is_some_and(|raw| raw.fract() != 0.0) {
                    return Some(Value::Number(value.clone()));
                }
                self.diagnostics.report(ValidationError::NumericCoerced {
                    field: field.to_string(),
                    expected: "float",
                    found: "int",
                });
                let raw = value.as_f64()?;
                let fixed = format!("{:.*}", FLOAT_PRECISION, raw)
                    .parse::<f64>()
                    .unwrap_or(raw);
                Some(
                    Number::from_f64(fixed)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::Number(value.clone())),
                )
            }
            other => {
                self.diagnostics
                    .report(ValidationError::UnsupportedNumericType {
                        field: field.to_string(),
                        declared: other.type_name(),
                    });
                None
            }
        }
    }
}

/// Rounds to the nearest whole number, with halves going toward positive
/// infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// # Examples
///
/// ```
/// use content_schema_core::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(1.2), 1.0);
/// ```
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn whole_number(raw: f64) -> Value {
    if raw >= i64::MIN as f64 && raw < i64::MAX as f64 {
        Value::from(raw as i64)
    } else {
        Number::from_f64(raw).map_or(Value::Null, Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::alias::AliasResolver;
    use crate::diagnostics::Diagnostics;
    use crate::options::ValidationOptions;

    fn coerce(value: Value, declared: FieldType) -> (Option<Value>, Vec<&'static str>) {
        let options = ValidationOptions::default();
        let aliases = AliasResolver::default();
        let mut diagnostics = Diagnostics::new("Stone");
        let number = match value {
            Value::Number(number) => number,
            other => panic!("expected number, got {other}"),
        };
        let result =
            TypeParser::new(&options, &aliases, &mut diagnostics).parse_nums("n", &number, &declared);
        let codes = diagnostics.entries().iter().map(|d| d.kind.code()).collect();
        (result, codes)
    }

    #[test]
    fn test_int_rounds_fractional_values() {
        assert_eq!(coerce(json!(2.6), FieldType::Int), (Some(json!(3)), vec!["numeric_coerced"]));
        assert_eq!(coerce(json!(2.5), FieldType::Int).0, Some(json!(3)));
        assert_eq!(coerce(json!(-2.5), FieldType::Int).0, Some(json!(-2)));
        assert_eq!(coerce(json!(-0.4), FieldType::Int).0, Some(json!(0)));
    }

    #[test]
    fn test_int_keeps_whole_values() {
        assert_eq!(coerce(json!(7), FieldType::Int), (Some(json!(7)), vec![]));
        assert_eq!(coerce(json!(7.0), FieldType::Int), (Some(json!(7)), vec![]));
        assert_eq!(coerce(json!(u64::MAX), FieldType::Int).0, Some(json!(u64::MAX)));
    }

    #[test]
    fn test_int_does_not_saturate_above_i64_range() {
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        let (value, codes) = coerce(json!(two_pow_63), FieldType::Int);
        assert!(codes.is_empty());
        let value = value.unwrap();
        assert_ne!(value, json!(i64::MAX));
        assert_eq!(value.as_f64(), Some(two_pow_63));

        let (value, _) = coerce(json!(-9_223_372_036_854_775_808.0_f64), FieldType::Int);
        assert_eq!(value, Some(json!(i64::MIN)));
    }

    #[test]
    fn test_float_normalizes_whole_values() {
        let (value, codes) = coerce(json!(6), FieldType::Float);
        assert_eq!(codes, vec!["numeric_coerced"]);
        let value = value.unwrap();
        assert!(value.is_f64());
        assert_eq!(value.as_f64(), Some(6.0));
        assert_eq!(value.to_string(), "6.0");
    }

    #[test]
    fn test_float_keeps_fractional_values() {
        assert_eq!(coerce(json!(0.6), FieldType::Float), (Some(json!(0.6)), vec![]));
        assert_eq!(
            coerce(json!(0.123456789012345), FieldType::Float).0,
            Some(json!(0.123456789012345))
        );
    }

    #[test]
    fn test_other_declared_types_are_unsupported() {
        assert_eq!(
            coerce(json!(1), FieldType::Number),
            (None, vec!["unsupported_numeric_type"])
        );
        assert_eq!(
            coerce(json!(1), FieldType::String),
            (None, vec!["unsupported_numeric_type"])
        );
    }

    #[test]
    fn test_round_half_up_near_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(3.0), 3.0);
        assert_eq!(round_half_up(-3.7), -4.0);
    }
}

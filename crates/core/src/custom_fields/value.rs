//! Coercion rules for untyped custom field values
//!
//! Candidate values arrive as arbitrary JSON. These helpers decide whether a
//! value is numeric, how it reads as a string, and what kind to report when it
//! is rejected.

use serde_json::Value;

/// Numeric reading of a value, if it has one.
///
/// Numbers qualify directly. Strings qualify when, after trimming ASCII
/// whitespace, they hold a finite decimal literal with optional sign,
/// fraction and exponent. Booleans, null and composites never qualify.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_str(text),
        _ => None,
    }
}

pub fn is_numeric(value: &Value) -> bool {
    numeric_value(value).is_some()
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    if trimmed.is_empty() {
        return None;
    }

    // Rules out "inf", "NaN" and hex forms that `f64::from_str` would accept.
    let decimal_only =
        trimmed.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_only {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Arrays and objects cannot be rendered as a scalar string.
pub fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Kind name reported in value-shape errors.
///
/// Objects and arrays both read as `array`; fractional numbers as `double`.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "array",
    }
}

/// String rendering used for dropdown matching, messages and `StringValue`.
///
/// Integral floats drop their fraction (`5.0` reads `"5"`), `true` reads
/// `"1"`, `false` and null read as empty, composites fall back to compact
/// JSON.
pub fn render_string(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
                format!("{float:.0}")
            }
            _ => number.to_string(),
        },
        composite => composite.to_string(),
    }
}

//! Primitive coercion rules.
//!
//! The policy is deliberately explicit rather than permissive:
//!
//! - `int` accepts exact integers, floats with a zero fractional part, and
//!   base-10 integer strings with an optional leading sign.
//! - `float` accepts integers, floats, and numeric strings.
//! - `bool` accepts booleans and the case-insensitive strings
//!   `"true"`/`"false"`; any other string is rejected.
//! - `string` accepts only strings, unless numeric-string coercion is
//!   switched on in the validation config.
//! - `date`, `datetime`, and `uuid` accept strings and normalize them to a
//!   canonical form, so a normalized record re-validates unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::FieldType;

/// A failed primitive coercion, with the type descriptions used for the
/// resulting type-mismatch failure.
#[derive(Debug, Clone)]
pub(crate) struct CoerceError {
    pub expected: String,
    pub actual: String,
}

/// Returns the JSON type name for error messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(value: &Value, ty: &FieldType) -> CoerceError {
    CoerceError {
        expected: ty.type_name(),
        actual: json_type_name(value).to_string(),
    }
}

/// Coerces a value to a leaf field type.
///
/// Container and nested types are walked by the engine; this function only
/// sees `Int`, `Float`, `Bool`, `String`, `Date`, `DateTime`, `Uuid`, and
/// `Literal`.
pub(crate) fn coerce_primitive(
    value: &Value,
    ty: &FieldType,
    numeric_strings: bool,
) -> Result<Value, CoerceError> {
    match ty {
        FieldType::Int => coerce_int(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::Float => coerce_float(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::Bool => coerce_bool(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::String => {
            coerce_string(value, numeric_strings).ok_or_else(|| mismatch(value, ty))
        }
        FieldType::Date => coerce_date(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::DateTime => coerce_datetime(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::Uuid => coerce_uuid(value).ok_or_else(|| mismatch(value, ty)),
        FieldType::Literal(allowed) => match value.as_str() {
            Some(text) if allowed.iter().any(|a| a == text) => Ok(value.clone()),
            _ => Err(mismatch(value, ty)),
        },
        _ => Err(mismatch(value, ty)),
    }
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return Some(value.clone());
            }
            // Floats pass only with a zero fractional part.
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                #[allow(clippy::cast_possible_truncation)]
                return Some(Value::from(f as i64));
            }
            None
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => {
            let f = n.as_f64()?;
            serde_json::Number::from_f64(f).map(Value::Number)
        }
        Value::String(s) => {
            let f = s.trim().parse::<f64>().ok()?;
            serde_json::Number::from_f64(f).map(Value::Number)
        }
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => {
            if s.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn coerce_string(value: &Value, numeric_strings: bool) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) if numeric_strings => Some(Value::String(n.to_string())),
        _ => None,
    }
}

fn coerce_date(value: &Value) -> Option<Value> {
    let text = value.as_str()?;
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()?;
    Some(Value::String(date.format("%Y-%m-%d").to_string()))
}

fn coerce_datetime(value: &Value) -> Option<Value> {
    let text = value.as_str()?.trim();
    let utc = if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        parsed.with_timezone(&Utc)
    } else {
        // Naive timestamps are taken as UTC.
        let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        naive.and_utc()
    };
    Some(Value::String(utc.to_rfc3339()))
}

fn coerce_uuid(value: &Value) -> Option<Value> {
    let text = value.as_str()?;
    let parsed = Uuid::parse_str(text.trim()).ok()?;
    Some(Value::String(parsed.hyphenated().to_string()))
}

//! Field parsing utilities for raw weather documents
//!
//! The source wraps most values as strings and human-readable text as
//! `[{"value": "..."}]`. These helpers strip that wrapping and coerce values
//! with proper error reporting for required fields. Optional helpers return
//! `None` for missing, empty or unparsable values.

use chrono::NaiveTime;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::constants::{COMPACT_TIME_FORMAT, keys};
use crate::temporal::{Temporal, parse_or_absent};

/// JSON object holding one level of a raw document
pub type Object = Map<String, Value>;

/// A structural problem at a specific location inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    path: Vec<String>,
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Prefix the error with the enclosing element, e.g. `weather[1]`
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

impl std::error::Error for FieldError {}

pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// Render a scalar JSON value as text, `None` for arrays, objects and null
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Get a required field value from an object
pub fn get_required_field<'a>(object: &'a Object, field_name: &str) -> FieldResult<&'a Value> {
    object
        .get(field_name)
        .ok_or_else(|| FieldError::new(format!("Required field '{}' not found", field_name)))
}

/// Get an optional field's text, skipping missing, null and empty values
pub fn get_optional_text(object: &Object, field_name: &str) -> Option<String> {
    object
        .get(field_name)
        .and_then(scalar_text)
        .filter(|s| !s.is_empty())
}

/// Parse a required string field
pub fn parse_required_string(object: &Object, field_name: &str) -> FieldResult<String> {
    let value = get_required_field(object, field_name)?;
    scalar_text(value).ok_or_else(|| {
        FieldError::new(format!(
            "Expected a scalar for field '{}', found {}",
            field_name,
            json_kind(value)
        ))
    })
}

/// Parse a required numeric field into `T`
pub fn parse_required<T>(object: &Object, field_name: &str) -> FieldResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let text = parse_required_string(object, field_name)?;
    text.parse::<T>().map_err(|e| {
        FieldError::new(format!(
            "Invalid numeric value for '{}': '{}' ({})",
            field_name, text, e
        ))
    })
}

/// Parse an optional numeric field into `T`
pub fn parse_optional<T: FromStr>(object: &Object, field_name: &str) -> Option<T> {
    let text = get_optional_text(object, field_name)?;
    match text.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(
                "Optional field '{}' = '{}' could not be parsed, treating as absent",
                field_name, text
            );
            None
        }
    }
}

/// Parse a required integer that may be reported with a fractional part
///
/// Count-like fields occasionally arrive as `"12.0"`; these are accepted as
/// long as the fraction is zero.
pub fn parse_required_int(object: &Object, field_name: &str) -> FieldResult<i32> {
    let text = parse_required_string(object, field_name)?;
    integer_from_text(&text).ok_or_else(|| {
        FieldError::new(format!(
            "Invalid integer value for '{}': '{}'",
            field_name, text
        ))
    })
}

/// Optional counterpart of [`parse_required_int`]
pub fn parse_optional_int(object: &Object, field_name: &str) -> Option<i32> {
    get_optional_text(object, field_name).and_then(|text| integer_from_text(&text))
}

fn integer_from_text(text: &str) -> Option<i32> {
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }
    let float = text.parse::<f64>().ok()?;
    let in_range = float >= i32::MIN as f64 && float <= i32::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i32)
}

/// Parse a required temporal field, resolving unparsable text to `None`
///
/// The key itself must be present; only its content is tolerated.
pub fn parse_temporal<T: Temporal>(
    object: &Object,
    field_name: &str,
    format: &str,
) -> FieldResult<Option<T>> {
    let text = parse_required_string(object, field_name)?;
    Ok(parse_or_absent(&text, format))
}

/// Parse a compact 24-hour time of day such as `900` or `1500`
///
/// The integer is zero-padded to four digits before parsing as `HHMM`.
pub fn parse_compact_time(object: &Object, field_name: &str) -> FieldResult<Option<NaiveTime>> {
    let compact = parse_required_int(object, field_name)?;
    Ok(parse_or_absent(
        &format!("{:04}", compact),
        COMPACT_TIME_FORMAT,
    ))
}

/// Unwrap a required `[{"value": "..."}]` field
pub fn unwrap_required_value(object: &Object, field_name: &str) -> FieldResult<String> {
    let wrapped = get_required_field(object, field_name)?;
    unwrap_value(wrapped).ok_or_else(|| {
        FieldError::new(format!(
            "Field '{}' is not a [{{\"{}\": ...}}] wrapper",
            field_name,
            keys::WRAPPED_VALUE
        ))
    })
}

/// Unwrap an optional `[{"value": "..."}]` field
pub fn unwrap_optional_value(object: &Object, field_name: &str) -> Option<String> {
    object
        .get(field_name)
        .and_then(unwrap_value)
        .filter(|s| !s.is_empty())
}

/// Strip exactly one level of array-then-`value` wrapping
pub fn unwrap_value(wrapped: &Value) -> Option<String> {
    wrapped
        .as_array()?
        .first()?
        .as_object()?
        .get(keys::WRAPPED_VALUE)
        .and_then(scalar_text)
}

/// Get the first object of a required single-element array field
pub fn first_object<'a>(object: &'a Object, field_name: &str) -> FieldResult<&'a Object> {
    let elements = required_array(object, field_name)?;
    elements
        .first()
        .ok_or_else(|| FieldError::new(format!("Field '{}' is an empty array", field_name)))?
        .as_object()
        .ok_or_else(|| {
            FieldError::new(format!(
                "First element of '{}' is not an object",
                field_name
            ))
        })
}

/// Get a required array field
pub fn required_array<'a>(object: &'a Object, field_name: &str) -> FieldResult<&'a Vec<Value>> {
    let value = get_required_field(object, field_name)?;
    value.as_array().ok_or_else(|| {
        FieldError::new(format!(
            "Expected an array for field '{}', found {}",
            field_name,
            json_kind(value)
        ))
    })
}

/// View an array element as an object
pub fn element_object(value: &Value) -> FieldResult<&Object> {
    value
        .as_object()
        .ok_or_else(|| FieldError::new(format!("Expected an object, found {}", json_kind(value))))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_parse_required_int_from_string_and_number() {
        let obj = object(json!({"humidity": "71", "cloudcover": 40, "uv": "3.0"}));
        assert_eq!(parse_required_int(&obj, "humidity").unwrap(), 71);
        assert_eq!(parse_required_int(&obj, "cloudcover").unwrap(), 40);
        assert_eq!(parse_required_int(&obj, "uv").unwrap(), 3);
    }

    #[test]
    fn test_parse_required_int_rejects_fraction_and_text() {
        let obj = object(json!({"a": "3.5", "b": "n/a", "c": ""}));
        assert!(parse_required_int(&obj, "a").is_err());
        assert!(parse_required_int(&obj, "b").is_err());
        assert!(parse_required_int(&obj, "c").is_err());
    }

    #[test]
    fn test_parse_required_missing_field() {
        let obj = object(json!({}));
        let err = parse_required::<f64>(&obj, "precipMM").unwrap_err();
        assert!(err.message().contains("precipMM"));
    }

    #[test]
    fn test_parse_required_float_keeps_fraction() {
        let obj = object(json!({"precipMM": "0.3", "sunHour": "8.7"}));
        assert_eq!(parse_required::<f64>(&obj, "precipMM").unwrap(), 0.3);
        assert_eq!(parse_required::<f64>(&obj, "sunHour").unwrap(), 8.7);
    }

    #[test]
    fn test_parse_optional_absent_and_unparsable() {
        let obj = object(json!({"pressureInches": "30", "visibilityMiles": "", "precipInches": "x"}));
        assert_eq!(parse_optional_int(&obj, "pressureInches"), Some(30));
        assert_eq!(parse_optional_int(&obj, "visibilityMiles"), None);
        assert_eq!(parse_optional::<f64>(&obj, "precipInches"), None);
        assert_eq!(parse_optional::<i64>(&obj, "population"), None);
    }

    #[test]
    fn test_unwrap_value() {
        let obj = object(json!({
            "weatherDesc": [{"value": "Partly cloudy"}],
            "weatherUrl": [{"value": ""}],
            "bare": "text"
        }));
        assert_eq!(unwrap_required_value(&obj, "weatherDesc").unwrap(), "Partly cloudy");
        assert_eq!(unwrap_optional_value(&obj, "weatherUrl"), None);
        assert!(unwrap_required_value(&obj, "bare").is_err());
        assert!(unwrap_required_value(&obj, "missing").is_err());
    }

    #[test]
    fn test_parse_compact_time_zero_pads() {
        let obj = object(json!({"midnight": "0", "morning": "900", "afternoon": "1500", "bad": "2500"}));
        assert_eq!(
            parse_compact_time(&obj, "midnight").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(
            parse_compact_time(&obj, "morning").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        assert_eq!(
            parse_compact_time(&obj, "afternoon").unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0)
        );
        assert_eq!(parse_compact_time(&obj, "bad").unwrap(), None);
    }

    #[test]
    fn test_first_object_errors() {
        let obj = object(json!({"empty": [], "scalar": "x", "nested": [{"query": "Berlin"}]}));
        assert!(first_object(&obj, "empty").is_err());
        assert!(first_object(&obj, "scalar").is_err());
        assert!(first_object(&obj, "missing").is_err());
        assert_eq!(
            first_object(&obj, "nested").unwrap().get("query"),
            Some(&json!("Berlin"))
        );
    }

    #[test]
    fn test_field_error_path() {
        let err = FieldError::new("Required field 'tempC' not found")
            .within("hourly[2]")
            .within("weather[0]");
        assert_eq!(
            err.to_string(),
            "weather[0].hourly[2]: Required field 'tempC' not found"
        );
    }
}

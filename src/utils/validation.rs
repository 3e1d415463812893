use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::error::Error;

/// Builds a single-field validation failure.
pub fn invalid_field(field: &'static str, code: &'static str, message: impl Into<String>) -> Error {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.into()));
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    Error::Validation(errors)
}

/// Counter coercion used by the forms: anything that is not a non-negative
/// integer becomes 0 instead of being rejected.
pub fn coerce_count(value: &JsonValue) -> i64 {
    let parsed = match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.filter(|n| *n >= 0).unwrap_or(0)
}

/// Checkbox semantics: `true`, `"on"`, `"true"` and `"1"` are set, anything else is not.
pub fn coerce_flag(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_i64() == Some(1),
        JsonValue::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "on" | "true" | "1"),
        _ => false,
    }
}

/// `#[serde(default, deserialize_with = "lenient_count")]`: absent stays `None`,
/// present-but-malformed becomes `Some(0)`.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(raw.map(|value| coerce_count(&value)))
}

pub fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(raw.map(|value| coerce_flag(&value)))
}

/// Trims a submitted text field; `None` stays `None`.
pub fn clean_text(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Trims an optional email; blank is allowed, anything else must be an address.
pub fn clean_email(value: Option<String>) -> Result<Option<String>, Error> {
    match clean_text(value) {
        Some(email) if !email.is_empty() && !email.validate_email() => Err(invalid_field(
            "email",
            "email",
            "Enter a valid email address.",
        )),
        other => Ok(other),
    }
}

pub fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| invalid_field(field, "invalid_uuid", format!("'{}' is not a valid UUID", raw.trim())))
}

use log::debug;
use serde::Serialize;
use serde_json::{Serializer, Value, ser::PrettyFormatter};

use crate::{errors::UnravelError, types::indentation::Indentation};

/// Whether `text` starts like a JSON object or array.
#[must_use]
pub fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Parse `text` as a JSON object or array. Scalars are rejected because a
/// string holding `"42"` or `"true"` is text, not an embedded document.
///
/// # Errors
///
/// If `text` is not valid JSON or its top-level value is not a container.
pub fn parse_container(text: &str) -> Result<Value, UnravelError> {
    if !looks_like_json(text) {
        return Err(UnravelError::parse_failure(
            "JSON",
            "value does not start with '{' or '['",
        ));
    }

    let value: Value = serde_json::from_str(text)?;
    debug_assert!(value.is_object() || value.is_array());
    Ok(value)
}

/// Serialize without any insignificant whitespace.
#[must_use]
pub fn to_compact_string(value: &Value) -> String { value.to_string() }

/// Serialize `value` laid out with `indentation`.
#[must_use]
pub fn to_string_with_indentation(value: &Value, indentation: &Indentation) -> String {
    let Some(indent) = indentation.indent_string() else {
        return to_compact_string(value);
    };

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));

    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_else(|_| to_compact_string(value)),
        Err(error) => {
            debug!("Falling back to compact output because serialization failed: {error}");
            to_compact_string(value)
        }
    }
}

/// Name of the JSON type of `value`, used in log messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use crate::errors::UnravelError;

/// Whether `text` might carry one level of JSON string escaping.
#[must_use]
pub fn looks_escaped(text: &str) -> bool { text.contains("\\\"") || text.contains("\\\\") }

/// Undo one level of JSON string escaping: `{\"a\":1}` becomes `{"a":1}`.
///
/// # Errors
///
/// If `text` is not a valid JSON string body, e.g. it contains an unescaped
/// quote or a dangling backslash.
pub fn json_unescape(text: &str) -> Result<String, UnravelError> {
    Ok(serde_json::from_str::<String>(&format!("\"{text}\""))?)
}

/// Apply one level of JSON string escaping. Inverse of [`json_unescape`].
#[must_use]
pub fn json_escape(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_owned()).to_string();
    quoted[1..quoted.len() - 1].to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_json_unescape() {
        assert_eq!(json_unescape(r#"{\"a\":1}"#).unwrap(), r#"{"a":1}"#);
        assert_eq!(json_unescape(r"line\nbreak").unwrap(), "line\nbreak");
        assert!(json_unescape(r#"unbalanced " quote"#).is_err());
        assert!(json_unescape("dangling \\").is_err());
    }

    #[test]
    fn test_json_escape_is_inverse() {
        for text in [r#"{"a":"b\c"}"#, "tab\there", "plain"] {
            assert_eq!(json_unescape(&json_escape(text)).unwrap(), text);
        }
        assert_eq!(json_escape(r#"{"a":1}"#), r#"{\"a\":1}"#);
    }

    #[test]
    fn test_looks_escaped() {
        assert!(looks_escaped(r#"{\"a\":1}"#));
        assert!(!looks_escaped(r#"{"a":1}"#));
    }
}

use log::debug;
use serde_json::{Map, Value};

use crate::{
    codecs::{parse_container, to_compact_string, to_string_with_indentation},
    types::{indentation::Indentation, line_ending::LineEnding},
};

/// Restore the string encoding of nested values without a context, by
/// comparing the edited expansion with the original document.
///
/// Wherever the original holds a string and the edited document holds an
/// object or array, the edited value is turned back into a compact JSON
/// string. Keys and items only present in the edited document are kept as
/// they are, and ones the user removed stay removed.
///
/// The result is laid out like `original_text`, including its line ending
/// and trailing newline. If `edited_text` is not
/// valid JSON it is returned unchanged.
///
/// ```
/// use unravel_text::merge;
///
/// let merged = merge("{\n  \"a\": {\n    \"b\": 2\n  }\n}", r#"{"a":"{\"b\":1}"}"#);
///
/// assert_eq!(merged, r#"{"a":"{\"b\":2}"}"#);
/// ```
#[must_use]
pub fn merge(edited_text: &str, original_text: &str) -> String {
    let edited: Value = match serde_json::from_str(edited_text) {
        Ok(value) => value,
        Err(error) => {
            debug!("Returning edited text unchanged because it is not valid JSON: {error}");
            return edited_text.to_owned();
        }
    };

    let indentation = Indentation::detect(original_text);
    let merged = match serde_json::from_str::<Value>(original_text) {
        Ok(original) => merge_values(edited, &original),
        Err(error) => {
            debug!("Only re-indenting because the original is not valid JSON: {error}");
            edited
        }
    };

    LineEnding::detect(original_text).apply(
        to_string_with_indentation(&merged, &indentation),
        original_text.ends_with('\n'),
    )
}

fn merge_values(edited: Value, original: &Value) -> Value {
    match (edited, original) {
        (edited @ (Value::Object(_) | Value::Array(_)), Value::String(encoded)) => {
            // The string may itself hold nested strings
            let restored = match parse_container(encoded) {
                Ok(nested) => merge_values(edited, &nested),
                Err(_) => edited,
            };
            Value::String(to_compact_string(&restored))
        }
        (Value::Object(edited), Value::Object(original)) => Value::Object(
            edited
                .into_iter()
                .map(|(key, child)| {
                    let child = match original.get(&key) {
                        Some(original_child) => merge_values(child, original_child),
                        None => child,
                    };
                    (key, child)
                })
                .collect::<Map<_, _>>(),
        ),
        (Value::Array(edited), Value::Array(original)) => Value::Array(
            edited
                .into_iter()
                .enumerate()
                .map(|(index, child)| match original.get(index) {
                    Some(original_child) => merge_values(child, original_child),
                    None => child,
                })
                .collect(),
        ),
        (edited, _) => edited,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_edited_nested_object_is_encoded_again() {
        let original = r#"{"a":"{\"b\":1}","c":3}"#;
        let edited = "{\n  \"a\": {\n    \"b\": 5\n  },\n  \"c\": 4\n}";
        assert_eq!(merge(edited, original), r#"{"a":"{\"b\":5}","c":4}"#);
    }

    #[test]
    fn test_doubly_nested_strings() {
        let original = r#"{"a":"{\"b\":\"[1,2]\"}"}"#;
        let edited = r#"{"a":{"b":[1,2,3]}}"#;
        assert_eq!(merge(edited, original), r#"{"a":"{\"b\":\"[1,2,3]\"}"}"#);
    }

    #[test]
    fn test_added_and_removed_keys() {
        let original = r#"{"keep":"{\"x\":1}","drop":"{}"}"#;
        let edited = r#"{"keep":{"x":1},"new":{"y":2}}"#;
        assert_eq!(
            merge(edited, original),
            r#"{"keep":"{\"x\":1}","new":{"y":2}}"#
        );
    }

    #[test]
    fn test_arrays_merge_by_position() {
        let original = r#"["[1]",{"k":"{}"}]"#;
        let edited = r#"[[1,2],{"k":{"z":true}},"extra"]"#;
        assert_eq!(
            merge(edited, original),
            r#"["[1,2]",{"k":"{\"z\":true}"},"extra"]"#
        );
    }

    #[test]
    fn test_layout_follows_original() {
        let original = "{\n    \"a\": \"{\\\"b\\\":1}\"\n}";
        let edited = r#"{"a":{"b":1}}"#;
        assert_eq!(merge(edited, original), "{\n    \"a\": \"{\\\"b\\\":1}\"\n}");
    }

    #[test]
    fn test_line_ending_and_trailing_newline_follow_original() {
        let original = "{\r\n  \"a\": \"[1]\"\r\n}\r\n";
        let edited = "{\n  \"a\": [\n    1,\n    2\n  ]\n}";
        assert_eq!(merge(edited, original), "{\r\n  \"a\": \"[1,2]\"\r\n}\r\n");
    }

    #[test]
    fn test_invalid_original_only_reindents() {
        assert_eq!(merge("{ \"a\" : 1 }", "not json"), r#"{"a":1}"#);
    }

    #[test]
    fn test_invalid_edit_is_returned_unchanged() {
        assert_eq!(merge("{ oops", r#"{"a":1}"#), "{ oops");
    }
}

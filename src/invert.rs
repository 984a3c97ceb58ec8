use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::{
    codecs::{
        Base64Flavor, base64_decode, base64_encode, json::type_name, json_escape, json_unescape,
        parse_container, percent_decode, percent_encode, to_compact_string,
        to_string_with_indentation, unicode_escape, unicode_unescape,
    },
    errors::UnravelError,
    types::{
        path_segment::{Path, PathSegment, format_path},
        transform_context::{PathTransformRecord, TransformContext},
        transform_step::TransformStep,
    },
};

/// Turn an edited expansion back into the encoded document described by
/// `context`.
///
/// The edited document is walked bottom-up. Wherever `context` has a record
/// for the path of a node, the recorded steps are undone in reverse order on
/// the already rebuilt node, so a nested object that came from a JSON string
/// turns back into a compact JSON string, Unicode escapes are restored, and
/// so on. Steps that no longer fit the edited node (e.g. the nested object
/// was replaced by a number) are skipped and the node is kept as it is.
///
/// The output is laid out like the original document. If `edited_text` is
/// not valid JSON, it is returned unchanged.
///
/// ```
/// use unravel_text::{decode, invert};
///
/// let (expanded, context) = decode(r#"{"a":"{\"b\":1}"}"#, 10);
/// let edited = expanded.replace("1", "2");
///
/// assert_eq!(invert(&edited, &context), r#"{"a":"{\"b\":2}"}"#);
/// ```
#[must_use]
pub fn invert(edited_text: &str, context: &TransformContext) -> String {
    let edited: Value = match serde_json::from_str(edited_text) {
        Ok(value) => value,
        Err(error) => {
            debug!("Returning edited text unchanged because it is not valid JSON: {error}");
            return edited_text.to_owned();
        }
    };

    let inverter = Inverter::new(context.record_map());
    let rebuilt = inverter.rebuild(edited, &mut Vec::new());

    context.line_ending().apply(
        to_string_with_indentation(&rebuilt, context.original_indentation()),
        context.trailing_newline(),
    )
}

/// Rebuilds encoded values from expanded ones using a set of records. Also
/// used by the tree walker to find out what the unedited expansion inverts
/// to.
#[derive(Debug)]
pub(crate) struct Inverter<'a> {
    records: &'a BTreeMap<Path, PathTransformRecord>,
}

impl<'a> Inverter<'a> {
    pub(crate) fn new(records: &'a BTreeMap<Path, PathTransformRecord>) -> Self { Self { records } }

    /// Rebuild `value` found at `path`, including the record of `path`
    /// itself.
    pub(crate) fn rebuild(&self, value: Value, path: &mut Path) -> Value {
        let value = self.rebuild_children(value, path);
        match self.records.get(path) {
            Some(record) => encode_with_record(value, record, path),
            None => value,
        }
    }

    /// Rebuild the descendants of `value`, leaving the node at `path` as is.
    pub(crate) fn rebuild_children(&self, value: Value, path: &mut Path) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, child)| {
                        path.push(PathSegment::Key(key.clone()));
                        let child = self.rebuild(child, path);
                        path.pop();
                        (key, child)
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| {
                        path.push(PathSegment::Index(index));
                        let child = self.rebuild(child, path);
                        path.pop();
                        child
                    })
                    .collect(),
            ),
            scalar => scalar,
        }
    }
}

/// Undo the steps of `record` and swap in the original text when the result
/// is what the unedited expansion would have produced.
fn encode_with_record(value: Value, record: &PathTransformRecord, path: &Path) -> Value {
    match undo_steps(value, &record.steps, path) {
        Value::String(encoded) if record.canonical_encoding.as_ref() == Some(&encoded) => {
            Value::String(record.original_value.clone())
        }
        encoded => encoded,
    }
}

/// Apply the inverses of `steps` in reverse order.
pub(crate) fn undo_steps(value: Value, steps: &[TransformStep], path: &Path) -> Value {
    steps
        .iter()
        .rev()
        .fold(value, |value, step| undo_step(value, *step, path))
}

fn undo_step(value: Value, step: TransformStep, path: &Path) -> Value {
    let inverse = step.inverse();

    match (inverse, value) {
        (TransformStep::JsonEncode, value @ (Value::Object(_) | Value::Array(_))) => {
            Value::String(to_compact_string(&value))
        }
        (TransformStep::JsonDecode, Value::String(text)) => match parse_container(&text) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!("Keeping string at {} as is: {error}", format_path(path));
                Value::String(text)
            }
        },
        (inverse, Value::String(text)) if !inverse.is_structural() => {
            match apply_to_string(inverse, &text) {
                Ok(encoded) => Value::String(encoded),
                Err(error) => {
                    debug!("Keeping string at {} as is: {error}", format_path(path));
                    Value::String(text)
                }
            }
        }
        (_, value) => {
            let mismatch = UnravelError::InversionMismatch {
                path: format_path(path),
                step,
                found: type_name(&value),
            };
            debug!("Treating the edited value as final: {mismatch}");
            value
        }
    }
}

/// Apply a string-to-string step.
pub(crate) fn apply_to_string(step: TransformStep, text: &str) -> Result<String, UnravelError> {
    match step {
        TransformStep::UnicodeEncode => Ok(unicode_escape(text)),
        TransformStep::UnicodeDecode => Ok(unicode_unescape(text)),
        TransformStep::UrlEncode => Ok(percent_encode(text)),
        TransformStep::UrlDecode => percent_decode(text),
        TransformStep::Base64Encode { url_safe, padded } => {
            Ok(base64_encode(text, Base64Flavor { url_safe, padded }))
        }
        TransformStep::Base64Decode { .. } => base64_decode(text).map(|(decoded, _)| decoded),
        TransformStep::Escape => Ok(json_escape(text)),
        TransformStep::Unescape => json_unescape(text),
        TransformStep::JsonEncode | TransformStep::JsonDecode => Err(UnravelError::parse_failure(
            "JSON",
            "structural steps don't apply to strings",
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        decode,
        types::{indentation::Indentation, line_ending::LineEnding},
    };

    fn context_with(records: Vec<PathTransformRecord>) -> TransformContext {
        TransformContext::new(
            records
                .into_iter()
                .map(|record| (record.path.clone(), record))
                .collect(),
            Indentation::Compact,
            LineEnding::Lf,
            false,
        )
    }

    fn key(name: &str) -> PathSegment { PathSegment::Key(name.to_owned()) }

    #[test]
    fn test_unedited_expansion_round_trips() {
        let original = r#"{"a":"{\"b\":1}"}"#;
        let (expanded, context) = decode(original, 10);
        assert_eq!(invert(&expanded, &context), original);
    }

    #[test]
    fn test_crlf_document_round_trips() {
        let original = "{\r\n  \"a\": \"{\\\"b\\\":1}\"\r\n}";
        let (expanded, context) = decode(original, 10);
        assert_eq!(invert(&expanded, &context), original);
    }

    #[test]
    fn test_edit_inside_nested_string() {
        let (expanded, context) = decode(r#"{"a":"{\"b\":1}"}"#, 10);
        let edited = expanded.replace("\"b\": 1", "\"b\": 2");
        assert_eq!(invert(&edited, &context), r#"{"a":"{\"b\":2}"}"#);
    }

    #[test]
    fn test_invalid_edit_is_returned_unchanged() {
        let (_, context) = decode(r#"{"a":"{\"b\":1}"}"#, 10);
        assert_eq!(invert("{ broken", &context), "{ broken");
    }

    #[test]
    fn test_steps_are_undone_in_reverse_order() {
        let context = context_with(vec![PathTransformRecord {
            path: vec![key("a")],
            steps: vec![TransformStep::UnicodeDecode, TransformStep::JsonDecode],
            original_value: String::new(),
            canonical_encoding: None,
        }]);

        assert_eq!(
            invert(r#"{"a":{"name":"café"}}"#, &context),
            r#"{"a":"{\"name\":\"caf\\u00e9\"}"}"#
        );
    }

    #[test]
    fn test_replaced_object_is_kept_as_final() {
        let context = context_with(vec![PathTransformRecord {
            path: vec![key("a")],
            steps: vec![TransformStep::JsonDecode],
            original_value: r#"{"b":1}"#.to_owned(),
            canonical_encoding: None,
        }]);

        assert_eq!(invert(r#"{"a":"gone"}"#, &context), r#"{"a":"gone"}"#);
        assert_eq!(invert(r#"{"a":5}"#, &context), r#"{"a":5}"#);
    }

    #[test]
    fn test_canonical_encoding_restores_original_text() {
        let context = context_with(vec![PathTransformRecord {
            path: vec![key("a")],
            steps: vec![TransformStep::JsonDecode],
            original_value: r#"{ "b" : 1 }"#.to_owned(),
            canonical_encoding: Some(r#"{"b":1}"#.to_owned()),
        }]);

        assert_eq!(invert(r#"{"a":{"b":1}}"#, &context), r#"{"a":"{ \"b\" : 1 }"}"#);
        assert_eq!(invert(r#"{"a":{"b":3}}"#, &context), r#"{"a":"{\"b\":3}"}"#);
    }

    #[test]
    fn test_paths_without_records_are_untouched() {
        let context = context_with(vec![]);
        let rebuilt = Inverter::new(context.record_map())
            .rebuild(json!({"x": {"y": [1, "2"]}}), &mut Vec::new());
        assert_eq!(rebuilt, json!({"x": {"y": [1, "2"]}}));
    }

    #[test]
    fn test_string_steps() {
        assert_eq!(
            apply_to_string(TransformStep::UrlEncode, "a b").unwrap(),
            "a%20b"
        );
        assert_eq!(
            apply_to_string(
                TransformStep::Base64Encode {
                    url_safe: false,
                    padded: false
                },
                "hi"
            )
            .unwrap(),
            "aGk"
        );
        assert_eq!(
            apply_to_string(TransformStep::Escape, r#"{"a":1}"#).unwrap(),
            r#"{\"a\":1}"#
        );
        assert!(apply_to_string(TransformStep::JsonDecode, "{}").is_err());
    }
}

use std::collections::BTreeMap;

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::{
    codecs::{
        base64_decode, has_unicode_escapes, json_unescape, looks_escaped, looks_like_base64,
        looks_percent_encoded, parse_container, percent_decode, to_string_with_indentation,
        unicode_unescape,
    },
    config::{DecodeOptions, LeafStrategy},
    consts::EXPANDED_INDENTATION,
    errors::UnravelError,
    invert::{Inverter, undo_steps},
    types::{
        indentation::Indentation,
        line_ending::LineEnding,
        path_segment::{Path, PathSegment, format_path},
        transform_context::{PathTransformRecord, TransformContext},
        transform_step::TransformStep,
    },
};

/// Expand every nested encoding of a JSON document and record how to undo
/// it.
///
/// String values holding Unicode escapes are unescaped, and string values
/// holding a JSON object or array are replaced by that object or array,
/// which is then expanded too. The result is laid out with two spaces of
/// indentation. The returned context is what [`crate::invert`] needs to
/// turn an edited expansion back into the original format.
///
/// No single chain of nested values takes more than `max_depth` steps, which
/// bounds the work done on self-expanding input. If `raw_text` is not valid
/// JSON, it is returned unchanged together with an empty context.
///
/// ```
/// use unravel_text::decode;
///
/// let (expanded, context) = decode(r#"{"a":"{\"b\":1}"}"#, 10);
///
/// assert_eq!(expanded, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
/// assert_eq!(context.len(), 1);
/// ```
#[must_use]
pub fn decode(raw_text: &str, max_depth: usize) -> (String, TransformContext) {
    decode_with_options(raw_text, &DecodeOptions::with_max_depth(max_depth))
}

/// Same as [`decode`] with full control over the leaf strategies.
#[must_use]
pub fn decode_with_options(raw_text: &str, options: &DecodeOptions) -> (String, TransformContext) {
    let indentation = Indentation::detect(raw_text);
    let line_ending = LineEnding::detect(raw_text);
    let trailing_newline = raw_text.ends_with('\n');

    let root: Value = match serde_json::from_str(raw_text) {
        Ok(value) => value,
        Err(error) => {
            debug!("Returning text unchanged because it is not valid JSON: {error}");
            return (
                raw_text.to_owned(),
                TransformContext::empty(indentation, line_ending, trailing_newline),
            );
        }
    };

    let mut walker = TreeWalker {
        options,
        records: BTreeMap::new(),
    };
    let expanded = walker.visit(root, &mut Vec::new(), 0);

    (
        to_string_with_indentation(&expanded, &Indentation::Spaces(EXPANDED_INDENTATION)),
        TransformContext::new(walker.records, indentation, line_ending, trailing_newline),
    )
}

/// Result of trying a single strategy on a string leaf.
enum LeafOutcome {
    Text(String, TransformStep),
    Tree(Value),
}

struct TreeWalker<'a> {
    options: &'a DecodeOptions,
    records: BTreeMap<Path, PathTransformRecord>,
}

impl TreeWalker<'_> {
    /// `depth` is the number of steps already taken by the enclosing leaves.
    fn visit(&mut self, value: Value, path: &mut Path, depth: usize) -> Value {
        match value {
            Value::Object(map) => {
                let mut expanded = Map::with_capacity(map.len());
                for (key, child) in map {
                    path.push(PathSegment::Key(key.clone()));
                    expanded.insert(key, self.visit(child, path, depth));
                    path.pop();
                }
                Value::Object(expanded)
            }
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| {
                        path.push(PathSegment::Index(index));
                        let child = self.visit(child, path, depth);
                        path.pop();
                        child
                    })
                    .collect(),
            ),
            Value::String(text) => self.visit_string(text, path, depth),
            scalar => scalar,
        }
    }

    fn visit_string(&mut self, original: String, path: &mut Path, mut depth: usize) -> Value {
        let options = self.options;
        let max_depth = options.max_depth;
        let mut steps = Vec::new();
        let mut current = original.clone();

        let expanded = 'decode: loop {
            let mut changed = false;

            for strategy in &options.strategies {
                if depth >= max_depth {
                    trace!(
                        "{} at {}",
                        UnravelError::DepthExceeded { max_depth },
                        format_path(path)
                    );
                    break 'decode Value::String(current);
                }

                match try_strategy(*strategy, &current) {
                    Some(LeafOutcome::Text(text, step)) if text != current => {
                        trace!("Applied {step:?} at {}", format_path(path));
                        steps.push(step);
                        current = text;
                        depth += 1;
                        changed = true;
                    }
                    Some(LeafOutcome::Tree(tree)) => {
                        trace!("Expanded embedded JSON at {}", format_path(path));
                        steps.push(TransformStep::JsonDecode);
                        break 'decode self.visit(tree, path, depth + 1);
                    }
                    _ => {}
                }
            }

            if !changed {
                break Value::String(current);
            }
        };

        if !steps.is_empty() {
            let record = self.record_for(path, steps, original, &expanded);
            self.records.insert(path.clone(), record);
        }

        expanded
    }

    /// Build the record of `path`. The records of all descendants must exist
    /// already, so that the canonical encoding matches what inverting the
    /// unedited expansion produces.
    fn record_for(
        &self,
        path: &mut Path,
        steps: Vec<TransformStep>,
        original_value: String,
        expanded: &Value,
    ) -> PathTransformRecord {
        let rebuilt = Inverter::new(&self.records).rebuild_children(expanded.clone(), path);
        let canonical_encoding = match undo_steps(rebuilt, &steps, path) {
            Value::String(encoded) if encoded != original_value => Some(encoded),
            _ => None,
        };

        PathTransformRecord {
            path: path.clone(),
            steps,
            original_value,
            canonical_encoding,
        }
    }
}

fn try_strategy(strategy: LeafStrategy, text: &str) -> Option<LeafOutcome> {
    match strategy {
        LeafStrategy::Unicode => has_unicode_escapes(text).then(|| {
            LeafOutcome::Text(unicode_unescape(text), TransformStep::UnicodeDecode)
        }),
        LeafStrategy::Json => parse_container(text).ok().map(LeafOutcome::Tree),
        LeafStrategy::Unescape => looks_escaped(text)
            .then(|| json_unescape(text).ok())
            .flatten()
            .map(|unescaped| LeafOutcome::Text(unescaped, TransformStep::Unescape)),
        LeafStrategy::Percent => looks_percent_encoded(text)
            .then(|| percent_decode(text).ok())
            .flatten()
            .map(|decoded| LeafOutcome::Text(decoded, TransformStep::UrlDecode)),
        LeafStrategy::Base64 => looks_like_base64(text)
            .then(|| base64_decode(text).ok())
            .flatten()
            .map(|(decoded, flavor)| {
                LeafOutcome::Text(
                    decoded,
                    TransformStep::Base64Decode {
                        url_safe: flavor.url_safe,
                        padded: flavor.padded,
                    },
                )
            }),
    }
}

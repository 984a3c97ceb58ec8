use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CONTINUATION_PARAMETERS, DEFAULT_SCHEME_MAX_DEPTH};

/// Settings of [`crate::detect_and_decode_with_options`] and
/// [`crate::reencode_with_options`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchemeOptions {
    /// Maximum number of layers peeled off a value.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Names of the URL query parameters that are preferred when looking for
    /// an embedded payload, in priority order.
    #[serde(default = "default_continuation_parameters")]
    pub continuation_parameters: Vec<String>,
}

impl SchemeOptions {
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            continuation_parameters: default_continuation_parameters(),
        }
    }
}

fn default_max_depth() -> usize {
    debug!("Using default scheme decode max depth: {DEFAULT_SCHEME_MAX_DEPTH}");
    DEFAULT_SCHEME_MAX_DEPTH
}

fn default_continuation_parameters() -> Vec<String> {
    DEFAULT_CONTINUATION_PARAMETERS
        .iter()
        .map(|name| (*name).to_owned())
        .collect()
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            continuation_parameters: default_continuation_parameters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let options: SchemeOptions = serde_yaml::from_str("maxDepth: 2").unwrap();
        assert_eq!(options.max_depth, 2);
        assert_eq!(
            options.continuation_parameters,
            ["data", "params", "payload", "body", "json", "config"]
        );
    }

    #[test]
    fn test_custom_continuation_parameters() {
        let options: SchemeOptions =
            serde_json::from_str(r#"{"continuationParameters":["state"]}"#).unwrap();
        assert_eq!(options, SchemeOptions {
            max_depth: 5,
            continuation_parameters: vec!["state".to_owned()],
        });
    }
}

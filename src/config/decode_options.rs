use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TREE_MAX_DEPTH;

/// A decoding attempt the tree walker makes on every string leaf.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LeafStrategy {
    /// Replace `\uXXXX` sequences with the characters they stand for.
    Unicode,

    /// Parse the whole value as a JSON object or array.
    Json,

    /// Undo one level of JSON string escaping, e.g. `{\"a\":1}`.
    Unescape,

    /// Percent-decode values that look percent-encoded.
    Percent,

    /// Decode printable Base64 blobs.
    Base64,
}

/// Settings of [`crate::decode_with_options`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecodeOptions {
    /// Total number of steps a single chain of nested leaves may take.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Strategies tried on string leaves, in order.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<LeafStrategy>,
}

impl DecodeOptions {
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            strategies: default_strategies(),
        }
    }
}

fn default_max_depth() -> usize {
    debug!("Using default tree decode max depth: {DEFAULT_TREE_MAX_DEPTH}");
    DEFAULT_TREE_MAX_DEPTH
}

fn default_strategies() -> Vec<LeafStrategy> { vec![LeafStrategy::Unicode, LeafStrategy::Json] }

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            strategies: default_strategies(),
        }
    }
}

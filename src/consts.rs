/// Default depth budget of the tree walker.
pub const DEFAULT_TREE_MAX_DEPTH: usize = 10;

/// Default number of layers the scheme engine peels off a single value.
pub const DEFAULT_SCHEME_MAX_DEPTH: usize = 5;

/// Query parameters the URL step prefers to descend into, in priority order.
pub const DEFAULT_CONTINUATION_PARAMETERS: [&str; 6] =
    ["data", "params", "payload", "body", "json", "config"];

/// Shortest string that is considered for Base64 detection.
pub const MIN_BASE64_LENGTH: usize = 20;

/// Indentation of the expanded documents handed to the editor.
pub const EXPANDED_INDENTATION: usize = 2;

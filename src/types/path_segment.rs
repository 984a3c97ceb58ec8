use std::fmt::{self, Display, Write as _};

use serde::{Deserialize, Serialize};

/// One step from a JSON node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Structural address of a node within a JSON value. The empty path is the
/// root.
pub type Path = Vec<PathSegment>;

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self { PathSegment::Key(key.to_owned()) }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self { PathSegment::Index(index) }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::Key(key) if is_plain_identifier(key) => write!(f, ".{key}"),
            PathSegment::Key(key) => {
                let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                write!(f, "[{quoted}]")
            }
        }
    }
}

/// Format a path for presentation, e.g. `$.items[0]["a.b"]`.
///
/// Keys that are not plain identifiers are quoted so that keys containing
/// `.` or `[` can't be confused with nested paths.
#[must_use]
pub fn format_path(path: &[PathSegment]) -> String {
    let mut result = String::from("$");
    for segment in path {
        // Writing into a String can't fail
        let _ = write!(result, "{segment}");
    }
    result
}

fn is_plain_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

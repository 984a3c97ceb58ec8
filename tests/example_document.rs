use pretty_assertions::assert_eq;
use serde::Deserialize;

/// A test case for the decode and invert round trip.
///
/// `original` is decoded, the `edits` are applied to the expansion as plain
/// text replacements, and the result is inverted. An unedited document must
/// always invert to `original`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleDocument {
    name: String,
    original: String,

    /// Expected expansion, checked if present.
    #[serde(default)]
    expanded: Option<String>,

    #[serde(default)]
    edits: Vec<Replacement>,
    expected: String,

    /// Expected result of merging the edited expansion without a context,
    /// checked if present.
    #[serde(default)]
    merged: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Replacement {
    find: String,
    replace: String,
}

impl ExampleDocument {
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn original(&self) -> &str { &self.original }

    /// Apply the edits to `expanded`.
    ///
    /// # Panics
    ///
    /// If an edit doesn't match anything, since that means the example is
    /// out of date.
    #[must_use]
    pub fn edit(&self, expanded: &str) -> String {
        self.edits.iter().fold(expanded.to_owned(), |text, edit| {
            assert!(
                text.contains(&edit.find),
                "{}: {:?} not found in {text}",
                self.name,
                edit.find
            );
            text.replacen(&edit.find, &edit.replace, 1)
        })
    }

    pub fn assert_expanded(&self, expanded: &str) {
        if let Some(expected) = &self.expanded {
            assert_eq!(expanded, expected, "{}", self.name);
        }
    }

    pub fn assert_inverted(&self, inverted: &str) {
        assert_eq!(inverted, self.expected, "{}", self.name);
    }

    pub fn assert_merged(&self, merged: &str) {
        if let Some(expected) = &self.merged {
            assert_eq!(merged, expected, "{}", self.name);
        }
    }
}

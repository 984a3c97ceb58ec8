use serde::{Deserialize, Serialize};

/// Line separator of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Sniff the line ending of `text` from its first newline. Text without
    /// any newline uses `Lf`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(index) if text[..index].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Turn `text`, whose lines are separated by `\n`, into text using this
    /// line ending, appending a final one if `trailing_newline` is set.
    ///
    /// Serialized JSON never holds a raw newline inside a string, so every
    /// `\n` of it is a line break.
    #[must_use]
    pub fn apply(self, mut text: String, trailing_newline: bool) -> String {
        if trailing_newline {
            text.push('\n');
        }
        match self {
            LineEnding::Lf => text,
            LineEnding::CrLf => text.replace('\n', self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("{}", LineEnding::Lf ; "single line")]
    #[test_case("{\n}", LineEnding::Lf ; "unix")]
    #[test_case("{\r\n}", LineEnding::CrLf ; "windows")]
    #[test_case("{\r\n}\n", LineEnding::CrLf ; "first newline decides")]
    fn test_detect(text: &str, expected: LineEnding) {
        assert_eq!(LineEnding::detect(text), expected);
    }

    #[test]
    fn test_apply() {
        assert_eq!(LineEnding::Lf.apply("{\n}".to_owned(), true), "{\n}\n");
        assert_eq!(LineEnding::CrLf.apply("{\n}".to_owned(), false), "{\r\n}");
        assert_eq!(LineEnding::CrLf.apply("{\n}".to_owned(), true), "{\r\n}\r\n");
    }
}

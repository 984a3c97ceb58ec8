use serde::{Deserialize, Serialize};

/// How a JSON document is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Indentation {
    /// Everything on a single line without insignificant whitespace.
    #[default]
    Compact,

    /// One level of nesting is this many spaces.
    Spaces(usize),

    /// One level of nesting is this literal string, e.g. a tab.
    Literal(String),
}

impl Indentation {
    /// Sniff the indentation of `text`: the leading whitespace of the first
    /// non-blank line that is indented. Text without a newline, or without
    /// any indented line, is considered compact.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if !text.trim_end().contains('\n') {
            return Indentation::Compact;
        }

        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| &line[..line.len() - line.trim_start().len()])
            .find(|whitespace| !whitespace.is_empty())
            .map_or(Indentation::Compact, |whitespace| {
                if whitespace.chars().all(|c| c == ' ') {
                    Indentation::Spaces(whitespace.len())
                } else {
                    Indentation::Literal(whitespace.to_owned())
                }
            })
    }

    /// The string used for one level of nesting, or `None` when compact.
    #[must_use]
    pub fn indent_string(&self) -> Option<String> {
        match self {
            Indentation::Compact => None,
            Indentation::Spaces(count) => Some(" ".repeat(*count)),
            Indentation::Literal(literal) => Some(literal.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(r#"{"a":1}"#, Indentation::Compact ; "single line")]
    #[test_case("{\"a\":1}\n", Indentation::Compact ; "single line with trailing newline")]
    #[test_case("{\n  \"a\": 1\n}", Indentation::Spaces(2) ; "two spaces")]
    #[test_case("{\n    \"a\": 1\n}", Indentation::Spaces(4) ; "four spaces")]
    #[test_case("{\n\t\"a\": 1\n}", Indentation::Literal("\t".to_owned()) ; "tab")]
    #[test_case("\n\n{\n\n   \"a\": 1\n}", Indentation::Spaces(3) ; "blank lines are skipped")]
    #[test_case("[\n1\n]", Indentation::Compact ; "no indented line")]
    fn test_detect(text: &str, expected: Indentation) {
        assert_eq!(Indentation::detect(text), expected);
    }

    #[test]
    fn test_indent_string() {
        assert_eq!(Indentation::Compact.indent_string(), None);
        assert_eq!(Indentation::Spaces(3).indent_string().as_deref(), Some("   "));
        assert_eq!(
            Indentation::Literal("\t".to_owned()).indent_string().as_deref(),
            Some("\t")
        );
    }
}

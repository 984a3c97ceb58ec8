use std::sync::LazyLock;

use regex::Regex;

use crate::{
    codecs::{form_decode, form_encode, looks_like_json},
    scheme_layers::detect,
    types::scheme::{Scheme, SchemeInfo},
};

static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").expect("URL shape pattern is valid")
});

static URL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*)://([^/?#\s]*)([^?#\s]*)(?:\?([^#\s]*))?(#\S*)?$")
        .expect("URL parts pattern is valid")
});

pub(super) fn looks_like_url(text: &str) -> bool { URL_SHAPE.is_match(text) }

/// A single `key=value` entry of a query string as it appears in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuerySegment {
    raw_key: String,
    raw_value: Option<String>,
}

impl QuerySegment {
    fn parse(segment: &str) -> Self {
        match segment.split_once('=') {
            Some((key, value)) => Self {
                raw_key: key.to_owned(),
                raw_value: Some(value.to_owned()),
            },
            None => Self {
                raw_key: segment.to_owned(),
                raw_value: None,
            },
        }
    }

    fn is_empty(&self) -> bool { self.raw_key.is_empty() && self.raw_value.is_none() }

    fn key(&self) -> String { decode_component(&self.raw_key) }

    fn value(&self) -> String { self.raw_value.as_deref().map_or_else(String::new, decode_component) }
}

/// Query values that aren't valid form-urlencoded text are kept raw.
fn decode_component(raw: &str) -> String { form_decode(raw).unwrap_or_else(|_| raw.to_owned()) }

/// A URL split into the parts the scheme engine cares about. Serializing it
/// again without changes reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParsedUrl {
    protocol: String,
    authority: String,
    path: String,
    query: Option<Vec<QuerySegment>>,
    fragment: Option<String>,
}

impl ParsedUrl {
    pub(super) fn parse(text: &str) -> Option<Self> {
        let captures = URL_PARTS.captures(text)?;
        let part = |index| {
            captures
                .get(index)
                .map_or_else(String::new, |found| found.as_str().to_owned())
        };

        Some(Self {
            protocol: part(1),
            authority: part(2),
            path: part(3),
            query: captures
                .get(4)
                .map(|query| query.as_str().split('&').map(QuerySegment::parse).collect()),
            fragment: captures.get(5).map(|fragment| fragment.as_str().to_owned()),
        })
    }

    fn segments(&self) -> impl Iterator<Item = (usize, &QuerySegment)> {
        self.query
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, segment)| !segment.is_empty())
    }

    /// Decoded query parameters in order.
    pub(super) fn params(&self) -> Vec<(String, String)> {
        self.segments()
            .map(|(_, segment)| (segment.key(), segment.value()))
            .collect()
    }

    pub(super) fn info(&self) -> SchemeInfo {
        SchemeInfo {
            protocol: self.protocol.clone(),
            host: (!self.authority.is_empty()).then(|| self.authority.clone()),
            path: (!self.path.is_empty()).then(|| self.path.clone()),
            params: self.params(),
        }
    }

    /// The query parameter holding the embedded payload: the first of
    /// `preferred` that is present (compared case-insensitively), otherwise
    /// the first parameter whose value is itself encoded or looks like JSON.
    ///
    /// Returns the index into the query segments and the decoded key.
    pub(super) fn continuation(&self, preferred: &[String]) -> Option<(usize, String)> {
        let by_name = preferred.iter().find_map(|name| {
            self.segments()
                .find(|(_, segment)| segment.key().eq_ignore_ascii_case(name))
        });

        by_name
            .or_else(|| {
                self.segments().find(|(_, segment)| {
                    let value = segment.value();
                    detect(&value) != Scheme::Plain || looks_like_json(&value)
                })
            })
            .map(|(index, segment)| (index, segment.key()))
    }

    pub(super) fn value_at(&self, index: usize) -> Option<String> {
        self.query
            .as_ref()
            .and_then(|segments| segments.get(index))
            .map(QuerySegment::value)
    }

    /// Replace the value of the segment at `index` with the form-encoded
    /// `value`. Other segments keep their exact spelling.
    pub(super) fn set_value_at(&mut self, index: usize, value: &str) -> bool {
        match self.query.as_mut().and_then(|segments| segments.get_mut(index)) {
            Some(segment) => {
                segment.raw_value = Some(form_encode(value));
                true
            }
            None => false,
        }
    }

    pub(super) fn serialize(&self) -> String {
        let mut result = format!("{}://{}{}", self.protocol, self.authority, self.path);

        if let Some(segments) = &self.query {
            result.push('?');
            let query = segments
                .iter()
                .map(|segment| match &segment.raw_value {
                    Some(value) => format!("{}={value}", segment.raw_key),
                    None => segment.raw_key.clone(),
                })
                .collect::<Vec<_>>()
                .join("&");
            result.push_str(&query);
        }

        if let Some(fragment) = &self.fragment {
            result.push_str(fragment);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::consts::DEFAULT_CONTINUATION_PARAMETERS;

    fn preferred() -> Vec<String> {
        DEFAULT_CONTINUATION_PARAMETERS
            .iter()
            .map(|name| (*name).to_owned())
            .collect()
    }

    #[test_case("https://example.com/a?b=c#d")]
    #[test_case("https://example.com")]
    #[test_case("http://localhost:8080/path?flag&x=%7B%7D&&y=a+b")]
    #[test_case("myapp://open?payload=eyJ0eXBlIjoiaW52aXRlIn0%3D")]
    fn test_unchanged_url_serializes_to_itself(url: &str) {
        assert_eq!(ParsedUrl::parse(url).unwrap().serialize(), url);
    }

    #[test]
    fn test_info() {
        let url = ParsedUrl::parse("https://example.com/cb?state=a+b&data=%7B%7D").unwrap();
        assert_eq!(
            url.info(),
            SchemeInfo {
                protocol: "https".to_owned(),
                host: Some("example.com".to_owned()),
                path: Some("/cb".to_owned()),
                params: vec![
                    ("state".to_owned(), "a b".to_owned()),
                    ("data".to_owned(), "{}".to_owned()),
                ],
            }
        );
    }

    #[test]
    fn test_preferred_parameter_wins() {
        let url = ParsedUrl::parse("https://x.io/?q=%7B%22a%22%3A1%7D&DATA=plain").unwrap();
        assert_eq!(url.continuation(&preferred()), Some((1, "DATA".to_owned())));
    }

    #[test]
    fn test_falls_back_to_first_encoded_parameter() {
        let url = ParsedUrl::parse("https://x.io/?page=2&q=%7B%22a%22%3A1%7D").unwrap();
        assert_eq!(url.continuation(&preferred()), Some((1, "q".to_owned())));
        assert_eq!(url.value_at(1).as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_no_continuation() {
        let url = ParsedUrl::parse("https://x.io/search?page=2&sort=asc").unwrap();
        assert_eq!(url.continuation(&preferred()), None);
    }

    #[test]
    fn test_set_value_keeps_other_parameters() {
        let mut url = ParsedUrl::parse("https://x.io/?a=%41&data=old#top").unwrap();
        assert!(url.set_value_at(1, r#"{"x": 1}"#));
        assert_eq!(
            url.serialize(),
            "https://x.io/?a=%41&data=%7B%22x%22%3A+1%7D#top"
        );
        assert!(!url.set_value_at(5, "nothing"));
    }

    #[test]
    fn test_rejects_text_without_authority_separator() {
        assert!(!looks_like_url("mailto:someone@example.com"));
        assert!(ParsedUrl::parse("not a url").is_none());
    }
}

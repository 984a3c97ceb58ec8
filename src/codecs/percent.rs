use std::{fmt::Write as _, sync::LazyLock};

use regex::Regex;

use crate::errors::UnravelError;

static PERCENT_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%[0-9A-Fa-f]{2}").expect("percent escape pattern is valid"));

static QUERY_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^=&\s]+=[^&\s]*(?:&[^=&\s]+=[^&\s]*)*$").expect("query string pattern is valid")
});

/// Whether `text` contains `%XX` sequences and is not simply a flat
/// `key=value&key=value` query string.
#[must_use]
pub fn looks_percent_encoded(text: &str) -> bool {
    PERCENT_ESCAPE.is_match(text) && !QUERY_STRING.is_match(text)
}

/// Decode every `%XX` sequence. `+` is kept as is.
///
/// # Errors
///
/// If a `%` is not followed by two hex digits or the decoded bytes are not
/// valid UTF-8.
pub fn percent_decode(text: &str) -> Result<String, UnravelError> { decode(text, false) }

/// Decode a `application/x-www-form-urlencoded` component, where `+`
/// stands for a space.
///
/// # Errors
///
/// Same as [`percent_decode`].
pub fn form_decode(text: &str) -> Result<String, UnravelError> { decode(text, true) }

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the
/// same set JavaScript's `encodeURIComponent` leaves alone.
#[must_use]
pub fn percent_encode(text: &str) -> String {
    encode(text, false, |byte| {
        byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
    })
}

/// Encode a query parameter value the way HTML forms do: spaces become `+`
/// and everything except `A-Z a-z 0-9 * - . _` is percent-encoded.
#[must_use]
pub fn form_encode(text: &str) -> String {
    encode(text, true, |byte| {
        byte.is_ascii_alphanumeric() || matches!(byte, b'*' | b'-' | b'.' | b'_')
    })
}

fn encode(text: &str, space_as_plus: bool, is_unreserved: impl Fn(u8) -> bool) -> String {
    let mut result = String::with_capacity(text.len());
    for byte in text.bytes() {
        if space_as_plus && byte == b' ' {
            result.push('+');
        } else if is_unreserved(byte) {
            result.push(char::from(byte));
        } else {
            // Writing into a String can't fail
            let _ = write!(result, "%{byte:02X}");
        }
    }
    result
}

fn decode(text: &str, plus_as_space: bool) -> Result<String, UnravelError> {
    let bytes = text.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let byte = bytes
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .ok_or_else(|| {
                        UnravelError::parse_failure(
                            "percent-encoding",
                            format!("malformed escape at byte {i}"),
                        )
                    })?;
                result.push(byte);
                i += 3;
            }
            b'+' if plus_as_space => {
                result.push(b' ');
                i += 1;
            }
            byte => {
                result.push(byte);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8(result)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("%7B%22x%22%3A1%7D", true ; "encoded json")]
    #[test_case("hello%20world", true ; "encoded space")]
    #[test_case("a=%7B%7D&b=2", false ; "flat query string")]
    #[test_case("a=%7B%7D", false ; "single pair")]
    #[test_case("plain text", false ; "nothing encoded")]
    #[test_case("100% sure", false ; "lone percent")]
    fn test_looks_percent_encoded(text: &str, expected: bool) {
        assert_eq!(looks_percent_encoded(text), expected);
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("%7B%22x%22%3A1%7D").unwrap(), r#"{"x":1}"#);
        assert_eq!(percent_decode("caf%C3%A9+au+lait").unwrap(), "caf\u{e9}+au+lait");
        assert!(percent_decode("100%").is_err());
        assert!(percent_decode("%zz").is_err());
        assert!(percent_decode("%FF").is_err());
    }

    #[test]
    fn test_form_round_trip() {
        assert_eq!(form_encode("a b&c=d"), "a+b%26c%3Dd");
        assert_eq!(form_decode("a+b%26c%3Dd").unwrap(), "a b&c=d");
    }

    #[test_case("" ; "empty")]
    #[test_case(r#"{"x": [1, "two"]}"# ; "json")]
    #[test_case("caf\u{e9} \u{1f600} 100%+" ; "unicode and reserved")]
    #[test_case("already %20 encoded" ; "percent sign")]
    fn test_percent_round_trip(text: &str) {
        assert_eq!(percent_decode(&percent_encode(text)).unwrap(), text);
        assert_eq!(form_decode(&form_encode(text)).unwrap(), text);
    }
}

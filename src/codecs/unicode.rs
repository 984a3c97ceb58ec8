use std::{fmt::Write as _, sync::LazyLock};

use regex::Regex;

static UNICODE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("Unicode escape pattern is valid"));

/// Whether `text` contains at least one literal `\uXXXX` sequence.
#[must_use]
pub fn has_unicode_escapes(text: &str) -> bool { UNICODE_ESCAPE.is_match(text) }

/// Replace every `\uXXXX` sequence with the character it encodes. Adjacent
/// surrogate pairs are combined; lone surrogates are left as they are.
#[must_use]
pub fn unicode_unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending: Vec<(u16, &str)> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("\\u") {
        let (before, tail) = rest.split_at(start);
        if !before.is_empty() {
            flush_code_units(&mut result, &mut pending);
            result.push_str(before);
        }

        if let Some(unit) = tail.get(2..6).and_then(parse_code_unit) {
            pending.push((unit, &tail[..6]));
            rest = &tail[6..];
        } else {
            flush_code_units(&mut result, &mut pending);
            result.push_str("\\u");
            rest = &tail[2..];
        }
    }

    flush_code_units(&mut result, &mut pending);
    result.push_str(rest);
    result
}

/// Escape every non-ASCII character as `\uXXXX`, using surrogate pairs for
/// characters outside the Basic Multilingual Plane. Inverse of
/// [`unicode_unescape`] for text without literal escape sequences.
#[must_use]
pub fn unicode_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut buffer = [0u16; 2];
    for c in text.chars() {
        if c.is_ascii() {
            result.push(c);
        } else {
            for unit in c.encode_utf16(&mut buffer) {
                // Writing into a String can't fail
                let _ = write!(result, "\\u{unit:04x}");
            }
        }
    }
    result
}

fn parse_code_unit(hex: &str) -> Option<u16> {
    if hex.len() == 4 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        u16::from_str_radix(hex, 16).ok()
    } else {
        None
    }
}

fn flush_code_units(result: &mut String, pending: &mut Vec<(u16, &str)>) {
    let mut i = 0;
    while i < pending.len() {
        let (unit, raw) = pending[i];

        if let Some(c) = char::from_u32(u32::from(unit)) {
            result.push(c);
            i += 1;
            continue;
        }

        let low = pending.get(i + 1).map(|(low, _)| *low);
        if let Some(c) = low.and_then(|low| combine_surrogates(unit, low)) {
            result.push(c);
            i += 2;
        } else {
            result.push_str(raw);
            i += 1;
        }
    }
    pending.clear();
}

fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    if !(0xD800..0xDC00).contains(&high) || !(0xDC00..0xE000).contains(&low) {
        return None;
    }

    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(r"caf\u00e9", "caf\u{e9}" ; "latin")]
    #[test_case(r"\u0048\u0069", "Hi" ; "ascii")]
    #[test_case(r"\ud83d\ude00!", "\u{1f600}!" ; "surrogate pair")]
    #[test_case(r"\uD83D\uDE00", "\u{1f600}" ; "uppercase surrogate pair")]
    #[test_case(r"lone \uD83D here", r"lone \uD83D here" ; "lone surrogate is kept")]
    #[test_case(r"\uDE00\ud83d", r"\uDE00\ud83d" ; "reversed pair is kept")]
    #[test_case(r"broken \u12 escape", r"broken \u12 escape" ; "short escape")]
    #[test_case(r"\u00", r"\u00" ; "truncated at end")]
    #[test_case("plain", "plain" ; "nothing to do")]
    #[test_case(r"\u005cu0041", r"\u0041" ; "one level at a time")]
    fn test_unicode_unescape(text: &str, expected: &str) {
        assert_eq!(unicode_unescape(text), expected);
    }

    #[test]
    fn test_has_unicode_escapes() {
        assert!(has_unicode_escapes(r"a\u00e9"));
        assert!(!has_unicode_escapes(r"a\u00g9"));
        assert!(!has_unicode_escapes("\u{e9}"));
    }

    #[test_case("caf\u{e9}", r"caf\u00e9")]
    #[test_case("\u{1f600}", r"\ud83d\ude00")]
    #[test_case("ascii only", "ascii only")]
    fn test_unicode_escape(text: &str, expected: &str) {
        assert_eq!(unicode_escape(text), expected);
        assert_eq!(unicode_unescape(&unicode_escape(text)), text);
    }
}

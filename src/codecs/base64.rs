use std::sync::LazyLock;

use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
        general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
    },
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{consts::MIN_BASE64_LENGTH, errors::UnravelError};

const INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, INDIFFERENT);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, INDIFFERENT);

static BASE64_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]+|[A-Za-z0-9_-]+)={0,2}$").expect("Base64 pattern is valid")
});

/// Alphabet and padding of a Base64 string, needed to encode an edited value
/// the same way the original was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Flavor {
    pub url_safe: bool,
    pub padded: bool,
}

impl Base64Flavor {
    /// Infer the flavor from an encoded string.
    #[must_use]
    pub fn sniff(encoded: &str) -> Self {
        Self {
            url_safe: encoded.contains(['-', '_']),
            padded: encoded.ends_with('=') || encoded.len() % 4 == 0,
        }
    }

    fn encoder(self) -> &'static GeneralPurpose {
        match (self.url_safe, self.padded) {
            (false, true) => &STANDARD,
            (false, false) => &STANDARD_NO_PAD,
            (true, true) => &URL_SAFE,
            (true, false) => &URL_SAFE_NO_PAD,
        }
    }
}

/// Whether `text` is plausibly a Base64 encoded text: at least 20
/// characters of a single Base64 alphabet, `=` only as trailing padding, and
/// it decodes to printable UTF-8.
#[must_use]
pub fn looks_like_base64(text: &str) -> bool {
    text.len() >= MIN_BASE64_LENGTH
        && BASE64_CHARSET.is_match(text)
        && (!text.ends_with('=') || text.len() % 4 == 0)
        && base64_decode(text).is_ok()
}

/// Decode a Base64 string of either alphabet, with or without padding, into
/// printable text.
///
/// # Errors
///
/// If `text` is not valid Base64 or doesn't decode to printable UTF-8 text.
pub fn base64_decode(text: &str) -> Result<(String, Base64Flavor), UnravelError> {
    let flavor = Base64Flavor::sniff(text);
    let engine = if flavor.url_safe {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };

    let decoded = String::from_utf8(engine.decode(text)?)?;
    if !is_printable(&decoded) {
        return Err(UnravelError::parse_failure(
            "Base64",
            "decoded bytes are not printable text",
        ));
    }

    Ok((decoded, flavor))
}

/// Encode `text` with the given alphabet and padding.
#[must_use]
pub fn base64_encode(text: &str, flavor: Base64Flavor) -> String {
    flavor.encoder().encode(text.as_bytes())
}

fn is_printable(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
}

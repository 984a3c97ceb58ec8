use std::sync::LazyLock;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use regex::Regex;
use serde_json::{Value, json};

use crate::errors::UnravelError;

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$").expect("JWT pattern is valid")
});

/// Whether `text` has the shape of a JSON Web Token: three dot-separated
/// base64url segments, where the signature may be empty.
#[must_use]
pub fn looks_like_jwt(text: &str) -> bool { JWT.is_match(text) }

/// Decode the header and payload of a JWT. The result is a pretty-printed
/// JSON object with `header`, `payload` and the untouched `signature`.
///
/// Segments that aren't JSON are kept as strings.
///
/// # Errors
///
/// If `text` is not three segments or the header or payload is not base64url
/// encoded UTF-8.
pub fn jwt_decode(text: &str) -> Result<String, UnravelError> {
    let mut segments = text.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(UnravelError::parse_failure(
            "JWT",
            "expected exactly three segments",
        ));
    };

    let decoded = json!({
        "header": decode_segment(header)?,
        "payload": decode_segment(payload)?,
        "signature": signature,
    });

    Ok(serde_json::to_string_pretty(&decoded)?)
}

/// The `alg` claim of a decoded token, e.g. `HS256`.
#[must_use]
pub fn jwt_algorithm(decoded: &str) -> Option<String> {
    let value: Value = serde_json::from_str(decoded).ok()?;
    value
        .pointer("/header/alg")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn decode_segment(segment: &str) -> Result<Value, UnravelError> {
    let text = String::from_utf8(SEGMENT_ENGINE.decode(segment)?)?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

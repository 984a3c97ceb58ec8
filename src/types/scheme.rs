use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Outer encoding of a single string, as recognised by
/// [`crate::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    Jwt,
    Url,
    UrlEncoded,
    Base64,
    Json,
    Plain,
}

impl Scheme {
    /// Whether decoding stops once this scheme is detected.
    #[must_use]
    pub fn is_terminal(self) -> bool { matches!(self, Scheme::Json | Scheme::Plain) }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Jwt => write!(f, "JWT"),
            Scheme::Url => write!(f, "URL"),
            Scheme::UrlEncoded => write!(f, "URL-encoded"),
            Scheme::Base64 => write!(f, "Base64"),
            Scheme::Json => write!(f, "JSON"),
            Scheme::Plain => write!(f, "Plain"),
        }
    }
}

/// One layer peeled off a value by the scheme engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeLayer {
    pub scheme: Scheme,

    /// The text as it was before this layer was decoded.
    pub before_text: String,

    /// Human readable summary, e.g. `URL parameter "data"`.
    pub description: String,
}

/// Parsed structure of a URL met while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeInfo {
    pub protocol: String,
    pub host: Option<String>,
    pub path: Option<String>,

    /// Decoded query parameters in their original order.
    pub params: Vec<(String, String)>,
}

/// Outcome of [`crate::detect_and_decode`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDecodeResult {
    pub original: String,
    pub decoded: String,

    /// Layers in decoding order; the outermost layer comes first.
    pub layers: Vec<DecodeLayer>,
    pub is_json: bool,
    pub scheme_info: Option<SchemeInfo>,
}

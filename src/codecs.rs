//! Single-string codecs shared by the tree walker, the inverter and the
//! scheme engine.
//!
//! Decoders are fallible and report why a string is not in the expected
//! format; encoders are total.

pub mod base64;
pub mod escape;
pub mod json;
pub mod jwt;
pub mod percent;
pub mod unicode;

pub use base64::{Base64Flavor, base64_decode, base64_encode, looks_like_base64};
pub use escape::{json_escape, json_unescape, looks_escaped};
pub use json::{looks_like_json, parse_container, to_compact_string, to_string_with_indentation};
pub use jwt::{jwt_decode, looks_like_jwt};
pub use percent::{form_decode, form_encode, looks_percent_encoded, percent_decode, percent_encode};
pub use unicode::{has_unicode_escapes, unicode_escape, unicode_unescape};

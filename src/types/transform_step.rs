use serde::{Deserialize, Serialize};

/// A single reversible operation recorded against a path of the expanded
/// document.
///
/// The tree walker only ever records decode-direction steps. Their
/// encode-direction counterparts exist so that every step has an
/// [`inverse`](TransformStep::inverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransformStep {
    JsonDecode,
    JsonEncode,
    UnicodeDecode,
    UnicodeEncode,
    UrlDecode,
    UrlEncode,
    Base64Decode { url_safe: bool, padded: bool },
    Base64Encode { url_safe: bool, padded: bool },
    Escape,
    Unescape,
}

impl TransformStep {
    /// The step undoing `self`.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            TransformStep::JsonDecode => TransformStep::JsonEncode,
            TransformStep::JsonEncode => TransformStep::JsonDecode,
            TransformStep::UnicodeDecode => TransformStep::UnicodeEncode,
            TransformStep::UnicodeEncode => TransformStep::UnicodeDecode,
            TransformStep::UrlDecode => TransformStep::UrlEncode,
            TransformStep::UrlEncode => TransformStep::UrlDecode,
            TransformStep::Base64Decode { url_safe, padded } => {
                TransformStep::Base64Encode { url_safe, padded }
            }
            TransformStep::Base64Encode { url_safe, padded } => {
                TransformStep::Base64Decode { url_safe, padded }
            }
            TransformStep::Escape => TransformStep::Unescape,
            TransformStep::Unescape => TransformStep::Escape,
        }
    }

    /// Whether the step turns a string into a structured JSON value, or the
    /// other way around. All other steps map strings to strings.
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(self, TransformStep::JsonDecode | TransformStep::JsonEncode)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(TransformStep::JsonDecode)]
    #[test_case(TransformStep::UnicodeEncode)]
    #[test_case(TransformStep::UrlDecode)]
    #[test_case(TransformStep::Base64Decode { url_safe: true, padded: false })]
    #[test_case(TransformStep::Unescape)]
    fn test_inverse_is_involution(step: TransformStep) {
        assert_ne!(step.inverse(), step);
        assert_eq!(step.inverse().inverse(), step);
    }

    #[test]
    fn test_base64_inverse_keeps_metadata() {
        assert_eq!(
            TransformStep::Base64Decode {
                url_safe: true,
                padded: false
            }
            .inverse(),
            TransformStep::Base64Encode {
                url_safe: true,
                padded: false
            }
        );
    }
}

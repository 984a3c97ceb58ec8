use thiserror::Error;

use crate::types::{scheme::Scheme, transform_step::TransformStep};

/// Error type of the single-string codecs and the internal steps of the
/// engines.
///
/// None of these escape the public engine functions (`decode`, `invert`,
/// `detect_and_decode`, `reencode`, `merge`), which degrade to passing their
/// input through instead. They are returned by the functions of
/// [`crate::codecs`] and are what gets logged when a step is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnravelError {
    /// The text is not valid according to the grammar that was tried
    #[error("Failed to parse text as {grammar}: {reason}")]
    ParseFailure {
        /// Name of the expected grammar, e.g. "JSON" or "Base64"
        grammar: &'static str,
        /// Human readable cause
        reason: String,
    },

    /// A decode loop stopped because it ran out of depth budget. Partial
    /// progress is still a valid result.
    #[error("Stopped decoding after reaching the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured maximum depth
        max_depth: usize,
    },

    /// The edited structure no longer has the shape a recorded step expects
    #[error("Cannot apply the inverse of {step:?} at {path} to a value of type {found}")]
    InversionMismatch {
        /// Presentation form of the path of the node
        path: String,
        /// The recorded step that could not be inverted
        step: TransformStep,
        /// The JSON type found at the path
        found: &'static str,
    },

    /// The layer cannot be re-encoded, e.g. a JWT would need a new signature
    #[error("Layer {scheme:?} cannot be re-encoded")]
    IrreversibleLayer {
        /// The scheme of the skipped layer
        scheme: Scheme,
    },

    /// A URL has no query parameter worth descending into
    #[error("URL has no parameter that looks encoded")]
    NoContinuationParameter,
}

impl UnravelError {
    pub(crate) fn parse_failure(grammar: &'static str, reason: impl ToString) -> Self {
        UnravelError::ParseFailure {
            grammar,
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for UnravelError {
    fn from(error: serde_json::Error) -> Self { UnravelError::parse_failure("JSON", error) }
}

impl From<base64::DecodeError> for UnravelError {
    fn from(error: base64::DecodeError) -> Self { UnravelError::parse_failure("Base64", error) }
}

impl From<std::string::FromUtf8Error> for UnravelError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        UnravelError::parse_failure("UTF-8", error)
    }
}

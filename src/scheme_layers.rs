//! Peels outer encodings (JWT, URL, percent-encoding, Base64) off a single
//! string and puts them back on after the innermost content was edited.

mod rules;
mod url;

use log::{debug, trace};

use crate::{
    codecs::parse_container,
    config::SchemeOptions,
    errors::UnravelError,
    scheme_layers::{
        rules::{RULES, codec_for},
        url::ParsedUrl,
    },
    types::scheme::{DecodeLayer, Scheme, SchemeDecodeResult, SchemeInfo},
};

/// Classify the outermost encoding of `text`.
///
/// Rules are tried in priority order, so a JWT is reported as such even
/// though each of its segments is valid Base64.
#[must_use]
pub fn detect(text: &str) -> Scheme {
    RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .map_or(Scheme::Plain, |rule| rule.scheme)
}

/// Repeatedly detect and decode the outer encoding of `value` until plain
/// text or JSON is reached, at most `max_depth` times.
///
/// ```
/// use unravel_text::{Scheme, detect_and_decode};
///
/// let result = detect_and_decode("%7B%22x%22%3A1%7D", 5);
///
/// assert_eq!(result.decoded, r#"{"x":1}"#);
/// assert_eq!(result.layers[0].scheme, Scheme::UrlEncoded);
/// assert!(result.is_json);
/// ```
#[must_use]
pub fn detect_and_decode(value: &str, max_depth: usize) -> SchemeDecodeResult {
    detect_and_decode_with_options(value, &SchemeOptions::with_max_depth(max_depth))
}

/// Same as [`detect_and_decode`] with a configurable list of URL
/// continuation parameters.
#[must_use]
pub fn detect_and_decode_with_options(value: &str, options: &SchemeOptions) -> SchemeDecodeResult {
    let mut current = value.trim().to_owned();
    let mut layers = Vec::new();
    let mut scheme_info: Option<SchemeInfo> = None;

    loop {
        let scheme = detect(&current);
        if scheme.is_terminal() {
            break;
        }
        if layers.len() >= options.max_depth {
            debug!(
                "{}",
                UnravelError::DepthExceeded {
                    max_depth: options.max_depth
                }
            );
            break;
        }
        let Some(codec) = codec_for(scheme) else {
            break;
        };

        if scheme == Scheme::Url && scheme_info.is_none() {
            scheme_info = ParsedUrl::parse(&current).map(|url| url.info());
        }

        match (codec.decode)(&current, options) {
            Ok(decoded) if decoded.text != current => {
                trace!("Decoded {scheme} layer: {}", decoded.description);
                let before_text = std::mem::replace(&mut current, decoded.text);
                layers.push(DecodeLayer {
                    scheme,
                    before_text,
                    description: decoded.description,
                });
            }
            Ok(_) => {
                debug!("Stopped decoding because the {scheme} layer didn't change the text");
                break;
            }
            Err(error) => {
                debug!("Stopped decoding at the {scheme} layer: {error}");
                break;
            }
        }
    }

    SchemeDecodeResult {
        original: value.to_owned(),
        is_json: parse_container(&current).is_ok(),
        decoded: current,
        layers,
        scheme_info,
    }
}

/// Put the `layers` returned by [`detect_and_decode`] back around
/// `edited_content`, innermost first.
///
/// A layer whose content wasn't edited is restored from its original text,
/// so unchanged values survive even when the layer itself can't be
/// re-encoded. An edited JWT can't be signed again: its layer is skipped and
/// the content is passed on as it is.
#[must_use]
pub fn reencode(edited_content: &str, layers: &[DecodeLayer]) -> String {
    reencode_with_options(edited_content, layers, &SchemeOptions::default())
}

/// Same as [`reencode`] with the options the layers were decoded with.
#[must_use]
pub fn reencode_with_options(
    edited_content: &str,
    layers: &[DecodeLayer],
    options: &SchemeOptions,
) -> String {
    layers
        .iter()
        .rev()
        .fold(edited_content.to_owned(), |content, layer| {
            reencode_layer(content, layer, options)
        })
}

fn reencode_layer(content: String, layer: &DecodeLayer, options: &SchemeOptions) -> String {
    let Some(codec) = codec_for(layer.scheme) else {
        return content;
    };

    let unchanged = (codec.decode)(&layer.before_text, options)
        .is_ok_and(|decoded| decoded.text == content);
    if unchanged {
        return layer.before_text.clone();
    }

    match (codec.encode)(&content, layer, options) {
        Ok(encoded) => encoded,
        Err(error) => {
            debug!("Skipping layer \"{}\": {error}", layer.description);
            content
        }
    }
}

use crate::{
    codecs::{
        Base64Flavor, base64_decode, base64_encode, jwt::jwt_algorithm, jwt_decode,
        looks_like_base64, looks_like_jwt, looks_percent_encoded, parse_container,
        percent_decode, percent_encode,
    },
    config::SchemeOptions,
    errors::UnravelError,
    scheme_layers::url::{ParsedUrl, looks_like_url},
    types::scheme::{DecodeLayer, Scheme},
};

/// What a single decoder produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Decoded {
    pub text: String,
    pub description: String,
}

/// One entry of the detection table: how to recognise a scheme and, for
/// schemes that form a layer, how to peel it off and put it back on.
pub(super) struct SchemeRule {
    pub scheme: Scheme,
    pub matches: fn(&str) -> bool,

    /// `None` for schemes that end decoding instead of forming a layer.
    pub codec: Option<LayerCodec>,
}

pub(super) struct LayerCodec {
    pub decode: fn(&str, &SchemeOptions) -> Result<Decoded, UnravelError>,
    pub encode: fn(&str, &DecodeLayer, &SchemeOptions) -> Result<String, UnravelError>,
}

/// Detection order. The first rule that matches wins; text matching none of
/// them is [`Scheme::Plain`].
pub(super) static RULES: [SchemeRule; 5] = [
    SchemeRule {
        scheme: Scheme::Jwt,
        matches: |text| looks_like_jwt(text) && jwt_decode(text).is_ok(),
        codec: Some(LayerCodec {
            decode: decode_jwt,
            encode: |_, layer, _| {
                Err(UnravelError::IrreversibleLayer {
                    scheme: layer.scheme,
                })
            },
        }),
    },
    SchemeRule {
        scheme: Scheme::Url,
        matches: looks_like_url,
        codec: Some(LayerCodec {
            decode: decode_url,
            encode: encode_url,
        }),
    },
    SchemeRule {
        scheme: Scheme::UrlEncoded,
        matches: looks_percent_encoded,
        codec: Some(LayerCodec {
            decode: |text, _| {
                Ok(Decoded {
                    text: percent_decode(text)?,
                    description: "Percent-encoding".to_owned(),
                })
            },
            encode: |content, _, _| Ok(percent_encode(content)),
        }),
    },
    SchemeRule {
        scheme: Scheme::Base64,
        matches: looks_like_base64,
        codec: Some(LayerCodec {
            decode: decode_base64,
            encode: |content, layer, _| {
                Ok(base64_encode(
                    content,
                    Base64Flavor::sniff(&layer.before_text),
                ))
            },
        }),
    },
    SchemeRule {
        scheme: Scheme::Json,
        matches: |text| parse_container(text).is_ok(),
        codec: None,
    },
];

pub(super) fn codec_for(scheme: Scheme) -> Option<&'static LayerCodec> {
    RULES
        .iter()
        .find(|rule| rule.scheme == scheme)
        .and_then(|rule| rule.codec.as_ref())
}

fn decode_jwt(text: &str, _: &SchemeOptions) -> Result<Decoded, UnravelError> {
    let decoded = jwt_decode(text)?;
    let description = match jwt_algorithm(&decoded) {
        Some(algorithm) => format!("JWT ({algorithm})"),
        None => "JWT".to_owned(),
    };

    Ok(Decoded {
        text: decoded,
        description,
    })
}

fn decode_base64(text: &str, _: &SchemeOptions) -> Result<Decoded, UnravelError> {
    let (decoded, flavor) = base64_decode(text)?;
    let description = if flavor.url_safe {
        "Base64 (URL-safe alphabet)"
    } else {
        "Base64"
    };

    Ok(Decoded {
        text: decoded,
        description: description.to_owned(),
    })
}

fn parse_url(text: &str) -> Result<ParsedUrl, UnravelError> {
    ParsedUrl::parse(text).ok_or_else(|| UnravelError::parse_failure("URL", "malformed URL"))
}

fn decode_url(text: &str, options: &SchemeOptions) -> Result<Decoded, UnravelError> {
    let url = parse_url(text)?;
    let (index, key) = url
        .continuation(&options.continuation_parameters)
        .ok_or(UnravelError::NoContinuationParameter)?;

    Ok(Decoded {
        text: url
            .value_at(index)
            .ok_or(UnravelError::NoContinuationParameter)?,
        description: format!("URL parameter \"{key}\""),
    })
}

fn encode_url(
    content: &str,
    layer: &DecodeLayer,
    options: &SchemeOptions,
) -> Result<String, UnravelError> {
    let mut url = parse_url(&layer.before_text)?;
    let (index, _) = url
        .continuation(&options.continuation_parameters)
        .ok_or(UnravelError::NoContinuationParameter)?;

    if url.set_value_at(index, content) {
        Ok(url.serialize())
    } else {
        Err(UnravelError::NoContinuationParameter)
    }
}

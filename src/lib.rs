//! Expand nested encodings of text documents for editing and put them back
//! afterwards.
//!
//! - [`decode`] and [`invert`] work on JSON documents whose string values
//!   hold JSON themselves, possibly several levels deep. The context returned
//!   by [`decode`] records how every value was expanded.
//! - [`detect_and_decode`] and [`reencode`] peel outer encodings such as
//!   JWTs, URLs, percent-encoding and Base64 off a single value.
//! - [`merge`] restores string-encoded values when no context is available.
//! - [`diff_lines`] reports the changed line ranges of an edited text.
//!
//! None of the engine functions fail: input they can't handle is passed
//! through unchanged and the reason is logged through the `log` facade.

pub mod codecs;
pub mod config;
mod consts;
mod errors;
mod invert;
mod line_diff;
mod scheme_layers;
mod structural_merge;
mod tree_decode;
pub mod types;

pub use config::{DecodeOptions, LeafStrategy, SchemeOptions};
pub use errors::UnravelError;
pub use invert::invert;
pub use line_diff::diff_lines;
pub use scheme_layers::{
    detect, detect_and_decode, detect_and_decode_with_options, reencode, reencode_with_options,
};
pub use structural_merge::merge;
pub use tree_decode::{decode, decode_with_options};
pub use types::{
    diff_range::{DiffKind, DiffRange},
    indentation::Indentation,
    line_ending::LineEnding,
    path_segment::{Path, PathSegment, format_path},
    scheme::{DecodeLayer, Scheme, SchemeDecodeResult, SchemeInfo},
    transform_context::{PathTransformRecord, TransformContext},
    transform_step::TransformStep,
};

#[cfg(feature = "wasm")]
pub mod wasm;

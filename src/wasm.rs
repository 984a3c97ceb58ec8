//! Expose the crate to JavaScript through WebAssembly.
//!
//! Contexts and layers cross the boundary as JSON strings, so the editor can
//! keep them next to the document without knowing their shape.

use log::debug;
use wasm_bindgen::prelude::*;

use crate::{DecodeLayer, DiffRange, TransformContext};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around `crate::decode`.
///
/// # Panics
///
/// If serialising the context to JSON fails, which should not happen
#[wasm_bindgen(js_name = decodeDocument)]
#[must_use]
pub fn decode_document(raw_text: &str, max_depth: usize) -> DecodedDocument {
    set_panic_hook();

    let (expanded_text, context) = crate::decode(raw_text, max_depth);
    DecodedDocument {
        expanded_text,
        context_json: serde_json::to_string(&context).expect("Failed to serialize context"),
    }
}

/// WASM wrapper around `crate::invert`. The edited text is returned as is if
/// `context_json` is not a context created by `decodeDocument`.
#[wasm_bindgen(js_name = invertDocument)]
#[must_use]
pub fn invert_document(edited_text: &str, context_json: &str) -> String {
    set_panic_hook();

    match serde_json::from_str::<TransformContext>(context_json) {
        Ok(context) => crate::invert(edited_text, &context),
        Err(error) => {
            debug!("Returning edited text unchanged because the context is invalid: {error}");
            edited_text.to_owned()
        }
    }
}

/// WASM wrapper around `crate::detect_and_decode` returning the result as a
/// JSON string.
///
/// # Panics
///
/// If serialising the result to JSON fails, which should not happen
#[wasm_bindgen(js_name = detectAndDecode)]
#[must_use]
pub fn detect_and_decode(value: &str, max_depth: usize) -> String {
    set_panic_hook();

    let result = crate::detect_and_decode(value, max_depth);
    serde_json::to_string(&result).expect("Failed to serialize decode result")
}

/// WASM wrapper around `crate::reencode` taking the `layers` of a
/// `detectAndDecode` result as a JSON string.
#[wasm_bindgen(js_name = reencode)]
#[must_use]
pub fn reencode(edited_content: &str, layers_json: &str) -> String {
    set_panic_hook();

    match serde_json::from_str::<Vec<DecodeLayer>>(layers_json) {
        Ok(layers) => crate::reencode(edited_content, &layers),
        Err(error) => {
            debug!("Returning content unchanged because the layers are invalid: {error}");
            edited_content.to_owned()
        }
    }
}

#[wasm_bindgen(js_name = mergeDocuments)]
#[must_use]
pub fn merge_documents(edited_text: &str, original_text: &str) -> String {
    set_panic_hook();

    crate::merge(edited_text, original_text)
}

#[wasm_bindgen(js_name = diffLines)]
#[must_use]
pub fn diff_lines(previous: &str, current: &str) -> Vec<DiffRange> {
    set_panic_hook();

    crate::diff_lines(previous, current)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM wrapper type for the return value of `decode_document`
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedDocument {
    expanded_text: String,
    context_json: String,
}

#[wasm_bindgen]
impl DecodedDocument {
    #[wasm_bindgen(js_name = expandedText)]
    #[must_use]
    pub fn expanded_text(&self) -> String { self.expanded_text.clone() }

    #[wasm_bindgen(js_name = contextJson)]
    #[must_use]
    pub fn context_json(&self) -> String { self.context_json.clone() }
}

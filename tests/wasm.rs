#![cfg(feature = "wasm")]

use unravel_text::{DiffKind, wasm::*};
use wasm_bindgen_test::*;

#[wasm_bindgen_test(unsupported = test)]
fn test_decode_and_invert_document() {
    let original = r#"{"a":"{\"b\":1}"}"#;
    let decoded = decode_document(original, 10);

    assert_eq!(decoded.expanded_text(), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");

    let edited = decoded.expanded_text().replace("1", "2");
    assert_eq!(
        invert_document(&edited, &decoded.context_json()),
        r#"{"a":"{\"b\":2}"}"#
    );
}

#[wasm_bindgen_test(unsupported = test)]
fn test_invalid_context_passes_text_through() {
    assert_eq!(invert_document("{\"a\":1}", "not a context"), "{\"a\":1}");
}

#[wasm_bindgen_test(unsupported = test)]
fn test_detect_and_reencode() {
    let result: serde_json::Value =
        serde_json::from_str(&detect_and_decode("%7B%22x%22%3A1%7D", 5)).unwrap();

    assert_eq!(result["decoded"], r#"{"x":1}"#);
    assert_eq!(result["isJson"], true);
    assert_eq!(result["layers"][0]["scheme"], "urlEncoded");

    let layers = result["layers"].to_string();
    assert_eq!(reencode(r#"{"x":2}"#, &layers), "%7B%22x%22%3A2%7D");
    assert_eq!(reencode(r#"{"x":2}"#, "[oops"), r#"{"x":2}"#);
}

#[wasm_bindgen_test(unsupported = test)]
fn test_merge_documents() {
    assert_eq!(
        merge_documents(r#"{"a":{"b":2}}"#, r#"{"a":"{\"b\":1}"}"#),
        r#"{"a":"{\"b\":2}"}"#
    );
}

#[wasm_bindgen_test(unsupported = test)]
fn test_diff_lines() {
    let ranges = diff_lines("a\nb\nc", "a\nX\nc");

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].kind(), DiffKind::Modify);
    assert_eq!(ranges[0].start_line(), 2);
}

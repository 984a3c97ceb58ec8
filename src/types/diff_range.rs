use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg(feature = "wasm")]
pub enum DiffKind {
    Add = "add",
    Delete = "delete",
    Modify = "modify",
}

/// Kind of a changed line range shown in the gutter. When compiled to WASM,
/// the enum values are the lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg(not(feature = "wasm"))]
pub enum DiffKind {
    Add,
    Delete,
    Modify,
}

/// A range of lines of the current text that changed compared to the saved
/// text. Lines are 1-based and `end_line` is inclusive. A `Delete` range is a
/// zero-width marker, so its `start_line` equals its `end_line`.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRange {
    kind: DiffKind,
    start_line: usize,
    end_line: usize,
}

#[cfg_attr(feature = "wasm", wasm_bindgen)]
impl DiffRange {
    #[cfg_attr(feature = "wasm", wasm_bindgen(constructor))]
    #[must_use]
    pub fn new(kind: DiffKind, start_line: usize, end_line: usize) -> Self {
        debug_assert!(start_line <= end_line, "Ranges must not be reversed");
        Self {
            kind,
            start_line,
            end_line,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DiffKind { self.kind }

    #[cfg_attr(feature = "wasm", wasm_bindgen(js_name = startLine))]
    #[must_use]
    pub fn start_line(&self) -> usize { self.start_line }

    #[cfg_attr(feature = "wasm", wasm_bindgen(js_name = endLine))]
    #[must_use]
    pub fn end_line(&self) -> usize { self.end_line }
}

//! WASM bindings for the Liquid HTML parser.
//!
//! Exposes `parse()` and `check()` to JavaScript via wasm-bindgen.

use liquid_html_parser::{Document, ParseError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_serializer() -> serde_wasm_bindgen::Serializer {
    serde_wasm_bindgen::Serializer::new()
        .serialize_maps_as_objects(true)
        .serialize_missing_as_null(true)
}

/// Parse Liquid HTML source into a plain JS object tree.
///
/// Every node is an object with a `type` field and a `position` of
/// `{ start, end }` byte offsets. Throws a JS error if the source is
/// rejected.
#[wasm_bindgen]
pub fn parse(source: &str) -> Result<JsValue, JsError> {
    let document = parse_document(source).map_err(|e| JsError::new(&e.to_string()))?;
    document
        .serialize(&js_serializer())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Validate source without building a JS tree.
///
/// Returns `null` for well-formed input, otherwise the error as an object
/// `{ kind, message, offset, line, column }`.
#[wasm_bindgen]
pub fn check(source: &str) -> Result<JsValue, JsError> {
    match parse_document(source) {
        Ok(_) => Ok(JsValue::NULL),
        Err(error) => error
            .serialize(&js_serializer())
            .map_err(|e| JsError::new(&e.to_string())),
    }
}

/// Get the parser version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_document(source: &str) -> Result<Document, ParseError> {
    liquid_html_parser::parse(source)
}

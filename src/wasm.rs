//! WASM bindings for in-browser page enhancement.
//!
//! This module exposes the enhancement entry points to JavaScript via
//! wasm-bindgen, so the enhancer can run against a page's own markup.

use wasm_bindgen::prelude::*;

use crate::highlight::Engine;
use crate::page::{EnhanceOptions, enhance_str};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Enhance a page with the default options.
///
/// Takes the page's HTML and returns the enhanced HTML.
#[wasm_bindgen]
pub fn enhance(html: &str) -> Result<String, JsValue> {
    enhance_str(html, &EnhanceOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Enhance a page with a named highlighting engine (`"spans"` or `"naive"`).
#[wasm_bindgen]
pub fn enhance_with_engine(html: &str, engine: &str) -> Result<String, JsValue> {
    let engine: Engine = engine.parse().map_err(|e: String| JsValue::from_str(&e))?;
    let options = EnhanceOptions::default().with_engine(engine);
    enhance_str(html, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

//! WASM bindings for browser-based document editing.
//!
//! This module exposes the byte-level entry points to JavaScript via
//! wasm-bindgen. Candidates cross the boundary as a JSON string.

use wasm_bindgen::prelude::*;

use crate::edit::EditCandidate;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Apply accepted edits to a DOCX.
///
/// `candidates_json` is a JSON array of edit candidates; `accepted` holds
/// indices into it. Returns the updated DOCX bytes.
#[wasm_bindgen]
pub fn process_document(
    data: &[u8],
    accepted: &[u32],
    candidates_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let candidates: Vec<EditCandidate> =
        serde_json::from_str(candidates_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let accepted: Vec<usize> = accepted.iter().map(|&i| i as usize).collect();

    crate::service::process_document(data, &accepted, &candidates)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a DOCX to the placeholder PDF page.
#[wasm_bindgen]
pub fn export_pdf(data: &[u8]) -> Result<Vec<u8>, JsValue> {
    crate::service::export_pdf(data).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract the document's paragraph text, one paragraph per line.
#[wasm_bindgen]
pub fn extract_text(data: &[u8]) -> Result<String, JsValue> {
    crate::service::document_text(data).map_err(|e| JsValue::from_str(&e.to_string()))
}

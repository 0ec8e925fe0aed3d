use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn layout_document(json: &str) -> Result<String, JsValue> {
    crate::layout_json(json)
        .and_then(|output| crate::output_to_json(&output, false))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn layout_cv(json: &str) -> Result<String, JsValue> {
    crate::layout_cv_json(json)
        .and_then(|output| crate::output_to_json(&output, false))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

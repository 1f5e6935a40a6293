use wasm_bindgen::prelude::*;

use chatmark_core::{Pipeline, Settings};

#[wasm_bindgen]
pub fn render_html(markdown: &str) -> Result<String, JsValue> {
    render_html_with_options(markdown, JsValue::UNDEFINED)
}

/// Renders one message with host-supplied settings. `options` is a plain
/// object matching the serialized `Settings` shape; missing fields take
/// their defaults.
#[wasm_bindgen]
pub fn render_html_with_options(markdown: &str, options: JsValue) -> Result<String, JsValue> {
    let settings: Settings = if options.is_undefined() || options.is_null() {
        Settings::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|err| JsValue::from_str(&err.to_string()))?
    };
    let pipeline = Pipeline::new(settings);
    let html = pipeline
        .render(markdown)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(pipeline.sanitize(&html))
}

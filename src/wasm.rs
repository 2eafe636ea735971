use wasm_bindgen::prelude::*;

use crate::action_group::ToolbarLabels;
use crate::toolbar::resolve_json;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed (e.g. after a hot reload).
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Annotation toolbar resolver loaded");
}

/// Resolve a JSON toolbar snapshot into the JSON view model.
///
/// `labels_json` may be empty to use the default labels.
#[wasm_bindgen(js_name = resolveToolbar)]
pub fn resolve_toolbar(snapshot_json: &str, labels_json: &str) -> Result<String, JsValue> {
    let labels = if labels_json.trim().is_empty() {
        ToolbarLabels::default()
    } else {
        serde_json::from_str(labels_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    resolve_json(snapshot_json, &labels).map_err(|e| {
        log::warn!("Could not resolve toolbar: {}", e);
        JsValue::from_str(&e.to_string())
    })
}


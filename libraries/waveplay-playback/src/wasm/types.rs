//! JS-facing value conversions

use crate::types::WaveformOptions;
use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// Options object handed to the JS `create(container, options)` function
///
/// Colours are resolved here so the JS side never sees a missing one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions<'a> {
    pub height: u32,
    pub normalize: bool,
    pub interact: bool,
    pub backend: &'static str,
    pub media_controls: bool,
    pub wave_color: &'a str,
    pub progress_color: &'a str,
    pub cursor_color: &'a str,
}

impl<'a> From<&'a WaveformOptions> for EngineOptions<'a> {
    fn from(options: &'a WaveformOptions) -> Self {
        Self {
            height: options.height,
            normalize: options.normalize,
            interact: options.interact,
            backend: "WebAudio",
            media_controls: false,
            wave_color: &options.wave_color,
            progress_color: options.progress_color(),
            cursor_color: options.cursor_color(),
        }
    }
}

/// Best-effort text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }

    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }

    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_default()
}

/// Serialize for JS, mapping failures to `null`
pub fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

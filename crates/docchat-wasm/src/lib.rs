use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use docchat_core::ClientConfig;

mod app;
mod dom;
mod http;
mod surface;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("docchat WASM initialized");
}

/// Bind the upload and chat forms on the current page.
///
/// `track_history` defaults to true and `timeout_secs` to 330; a timeout of
/// zero disables the chat abort timer.
#[wasm_bindgen]
pub fn init_doc_chat(track_history: Option<bool>, timeout_secs: Option<u32>) -> Result<(), JsValue> {
    let mut config = ClientConfig::default();
    if let Some(track_history) = track_history {
        config = config.with_history(track_history);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout((secs > 0).then(|| Duration::from_secs(u64::from(secs))));
    }

    log::info!("Binding document chat: {:?}", config);
    app::DocChatApp::new(config)?.start()
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}

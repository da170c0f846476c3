/// Tab Corral - browser extension for herding tabs by domain
/// Built with Rust + WASM + Yew
mod browser;
mod census;
mod domain;
mod operations;
mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

use tab_data::{BackgroundCommand, CREATE_WINDOW_ACTION};

// Set up panic hook and logging; runs once per context (popup or background)
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export domain classification for JavaScript access
#[wasm_bindgen]
pub fn domain_key(url: &str) -> String {
    domain::domain_key(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Background entry point: the runtime message listener hands incoming
// popup commands straight through. Window creation has to happen here —
// opening a window kills the popup context mid-flight.
#[wasm_bindgen]
pub async fn handle_runtime_message(message: JsValue) -> Result<(), JsValue> {
    let command: BackgroundCommand = match serde_wasm_bindgen::from_value(message) {
        Ok(command) => command,
        Err(e) => {
            log::debug!("Ignoring unrecognized runtime message: {:?}", e);
            return Ok(());
        }
    };

    if command.action != CREATE_WINDOW_ACTION {
        log::debug!("Ignoring runtime message with action {:?}", command.action);
        return Ok(());
    }

    operations::move_domain_to_new_window(&command.domain_tabs).await;
    Ok(())
}

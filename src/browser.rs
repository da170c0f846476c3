/// Host browser bridge: typed wrappers over the window/tab management API
///
/// The extern block imports thin promise wrappers from js/browser_api.js;
/// both the popup and the background context load them. Everything here
/// awaits one host call at a time and maps rejections into readable Strings.
/// No timeouts are applied — a hung host call is left to the host to fail.
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::tab_data::{BackgroundCommand, TabInfo, WindowTabs};

/// Destination index that appends a moved tab at the tail of its new window.
pub const APPEND: i32 = -1;

#[wasm_bindgen(module = "/js/browser_api.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getAllWindows() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryWindowTabs(window_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createWindowWithTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveTab(tab_id: i32, window_id: i32, index: i32) -> Result<(), JsValue>;

    fn sendRuntimeMessage(message: JsValue);
}

#[derive(Deserialize)]
struct RawWindow {
    id: i32,
}

#[derive(Deserialize)]
struct RawTab {
    id: i32,
    // Absent for tabs the extension cannot read; classified as "unknown"
    #[serde(default)]
    url: String,
}

/// Enumerate all open windows and their tabs, in host-provided order.
/// Windows are queried one after another; the first failure aborts the whole
/// enumeration so the caller never sees a partial listing.
pub async fn enumerate_windows() -> Result<Vec<WindowTabs>, String> {
    let windows_js = getAllWindows()
        .await
        .map_err(|e| format!("Failed to enumerate windows: {:?}", e))?;
    let raw_windows: Vec<RawWindow> = serde_wasm_bindgen::from_value(windows_js)
        .map_err(|e| format!("Failed to parse window list: {:?}", e))?;

    let mut windows = Vec::with_capacity(raw_windows.len());
    for raw in raw_windows {
        let tabs_js = queryWindowTabs(raw.id)
            .await
            .map_err(|e| format!("Failed to enumerate tabs of window {}: {:?}", raw.id, e))?;
        let raw_tabs: Vec<RawTab> = serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| format!("Failed to parse tabs of window {}: {:?}", raw.id, e))?;

        let tabs = raw_tabs
            .into_iter()
            .map(|tab| TabInfo::new(tab.id, tab.url, raw.id))
            .collect();
        windows.push(WindowTabs { id: raw.id, tabs });
    }

    Ok(windows)
}

/// Convert an existing tab into the sole tab of a new window and return the
/// new window's id.
pub async fn create_window_with_tab(tab_id: i32) -> Result<i32, String> {
    let window_js = createWindowWithTab(tab_id)
        .await
        .map_err(|e| format!("Failed to create window from tab {}: {:?}", tab_id, e))?;
    serde_wasm_bindgen::from_value(window_js)
        .map_err(|e| format!("Failed to parse created window id: {:?}", e))
}

/// Move one tab into `window_id` at `index` (APPEND for the tail position).
pub async fn move_tab(tab_id: i32, window_id: i32, index: i32) -> Result<(), String> {
    moveTab(tab_id, window_id, index)
        .await
        .map_err(|e| format!("Failed to move tab {}: {:?}", tab_id, e))
}

/// Fire-and-forget command to the background context. The popup does not
/// await a result: it may already be gone by the time the background acts.
pub fn send_background_command(command: &BackgroundCommand) {
    match serde_wasm_bindgen::to_value(command) {
        Ok(message) => sendRuntimeMessage(message),
        Err(e) => log::error!("Failed to serialize background command: {:?}", e),
    }
}

/// Data structures for Tab Corral
use serde::{Deserialize, Serialize};

/// A browser tab as captured by one census pass, annotated with the window
/// that owned it at enumeration time. The host browser owns tab identity;
/// these values are only meaningful within the snapshot they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub window_id: i32,
}

impl TabInfo {
    pub fn new(id: i32, url: String, window_id: i32) -> TabInfo {
        TabInfo { id, url, window_id }
    }
}

/// One enumerated window and its tabs, in host-provided order.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowTabs {
    pub id: i32,
    pub tabs: Vec<TabInfo>,
}

/// The action tag carried by every popup → background message.
pub const CREATE_WINDOW_ACTION: &str = "createWindowWithTabs";

/// The one message the popup sends to the background context. The popup is
/// torn down the moment a new top-level window opens, so the new-window
/// consolidation has to run in the background; this command carries the tab
/// list over. Fire-and-forget: no acknowledgment comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundCommand {
    pub action: String,
    pub domain_tabs: Vec<TabInfo>,
}

impl BackgroundCommand {
    pub fn create_window_with_tabs(domain_tabs: Vec<TabInfo>) -> BackgroundCommand {
        BackgroundCommand {
            action: CREATE_WINDOW_ACTION.to_string(),
            domain_tabs,
        }
    }
}

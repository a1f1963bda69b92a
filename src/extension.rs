/// Bindings to the chrome.* APIs exposed by extension.js
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::{BookmarkError, BookmarkResult};

#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn createContextMenu(id: &str, title: &str, contexts: JsValue) -> Result<(), JsValue>;

    fn showNotification(title: &str, message: &str, icon_url: &str);

    fn exportToFile(data: &str, filename: &str);
}

/// Title and url of the focused tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTab {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

pub async fn get_sync_storage(keys: JsValue) -> BookmarkResult<JsValue> {
    getSyncStorage(keys)
        .await
        .map_err(|e| BookmarkError::Storage(format!("Failed to get storage: {:?}", e)))
}

pub async fn set_sync_storage(value: JsValue) -> BookmarkResult<()> {
    setSyncStorage(value)
        .await
        .map_err(|e| BookmarkError::Storage(format!("Failed to save storage: {:?}", e)))
}

/// The active tab of the current window, if the browser reports one
pub async fn active_tab() -> BookmarkResult<Option<ActiveTab>> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| BookmarkError::Bridge(format!("Failed to query tabs: {:?}", e)))?;

    parse_active_tab(tab_js)
}

pub fn parse_active_tab(tab_js: JsValue) -> BookmarkResult<Option<ActiveTab>> {
    if tab_js.is_null() || tab_js.is_undefined() {
        return Ok(None);
    }

    serde_wasm_bindgen::from_value(tab_js)
        .map(Some)
        .map_err(|e| BookmarkError::Bridge(format!("Failed to parse tab: {:?}", e)))
}

pub async fn open_tab(url: &str) -> BookmarkResult<()> {
    openTab(url)
        .await
        .map_err(|e| BookmarkError::Bridge(format!("Failed to open tab: {:?}", e)))
}

pub fn create_context_menu(id: &str, title: &str, contexts: &[&str]) -> BookmarkResult<()> {
    let contexts_js = serde_wasm_bindgen::to_value(&contexts)
        .map_err(|e| BookmarkError::Bridge(format!("Failed to serialize contexts: {:?}", e)))?;

    createContextMenu(id, title, contexts_js)
        .map_err(|e| BookmarkError::Bridge(format!("Failed to create menu {id}: {:?}", e)))
}

pub fn show_notification(title: &str, message: &str, icon_url: &str) {
    showNotification(title, message, icon_url);
}

pub fn export_to_file(data: &str, filename: &str) {
    exportToFile(data, filename);
}

/// Owl Bookmarks - Chrome Extension for Saving Bookmarks
/// Built with Rust + WASM + Yew

pub mod background;
pub mod bookmark;
pub mod commands;
pub mod config;
pub mod error;
pub mod extension;
pub mod modal;
pub mod storage;
pub mod store;
pub mod view;
pub mod ui;

use wasm_bindgen::prelude::*;

use crate::background::{ChromeNotifier, MENU_ITEMS, SaveRequest};
use crate::storage::SyncStorage;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export favicon derivation for JavaScript access
#[wasm_bindgen]
pub fn favicon_for(url: &str) -> String {
    bookmark::favicon_url(url).unwrap_or_default()
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Background worker entry points, called from the service worker listeners

#[wasm_bindgen]
pub fn register_context_menus() -> Result<(), JsValue> {
    for item in MENU_ITEMS {
        extension::create_context_menu(item.id, item.title, item.contexts)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    }
    Ok(())
}

#[wasm_bindgen]
pub async fn on_context_menu_clicked(
    menu_item_id: String,
    tab_title: String,
    tab_url: String,
    link_url: Option<String>,
) {
    match SaveRequest::from_menu_click(&menu_item_id, &tab_title, &tab_url, link_url.as_deref()) {
        Some(request) => save_from_background(request).await,
        None => log::debug!("ignoring menu item {}", menu_item_id),
    }
}

#[wasm_bindgen]
pub async fn on_command(command: String) {
    if !background::is_save_command(&command) {
        return;
    }

    match extension::active_tab().await {
        Ok(Some(tab)) => save_from_background(SaveRequest::new(tab.title, tab.url)).await,
        Ok(None) => log::warn!("no active tab to save"),
        Err(e) => log::error!("{}", e),
    }
}

async fn save_from_background(request: SaveRequest) {
    if let Err(e) = background::save_bookmark(&SyncStorage, &ChromeNotifier, &request).await {
        log::error!("Failed to save {}: {}", request.url, e);
    }
}

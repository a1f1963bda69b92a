/// Background worker: context menu and keyboard shortcut saves

use crate::config::{
    COMMAND_SAVE_BOOKMARK, DEFAULT_FOLDER, MENU_SAVE_LINK, MENU_SAVE_PAGE, NOTIFICATION_ICON,
    NOTIFICATION_TITLE,
};
use crate::error::BookmarkResult;
use crate::extension;
use crate::storage::StorageGateway;
use crate::store::BookmarkStore;

pub const DUPLICATE_MESSAGE: &str = "This page is already bookmarked!";
pub const SAVED_MESSAGE: &str = "✓ Bookmark saved successfully!";

/// A context menu entry registered on install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub contexts: &'static [&'static str],
}

pub const MENU_ITEMS: [MenuItem; 2] = [
    MenuItem {
        id: MENU_SAVE_PAGE,
        title: "Save to Owl Bookmarks",
        contexts: &["page", "link"],
    },
    MenuItem {
        id: MENU_SAVE_LINK,
        title: "Save Link to Owl Bookmarks",
        contexts: &["link"],
    },
];

/// Fire-and-forget user notifications
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// chrome.notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeNotifier;

impl Notifier for ChromeNotifier {
    fn notify(&self, message: &str) {
        extension::show_notification(NOTIFICATION_TITLE, message, NOTIFICATION_ICON);
    }
}

/// Page to save, taken from a menu click or the active tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub title: String,
    pub url: String,
}

impl SaveRequest {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        SaveRequest {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Work out what a context menu click wants saved
    ///
    /// Links have no title of their own, so the link url doubles as one.
    pub fn from_menu_click(
        menu_id: &str,
        tab_title: &str,
        tab_url: &str,
        link_url: Option<&str>,
    ) -> Option<SaveRequest> {
        match menu_id {
            MENU_SAVE_PAGE => Some(SaveRequest::new(tab_title, tab_url)),
            MENU_SAVE_LINK => link_url.map(|link| SaveRequest::new(link, link)),
            _ => None,
        }
    }
}

pub fn is_save_command(command: &str) -> bool {
    command == COMMAND_SAVE_BOOKMARK
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(String),
    Duplicate,
}

/// Load, skip duplicates, append to "default" and write both collections back
pub async fn save_bookmark<S, N>(
    storage: &S,
    notifier: &N,
    request: &SaveRequest,
) -> BookmarkResult<SaveOutcome>
where
    S: StorageGateway,
    N: Notifier,
{
    let mut store = BookmarkStore::from_library(storage.load().await?);

    if store.bookmark_exists(&request.url) {
        log::info!("{} is already bookmarked", request.url);
        notifier.notify(DUPLICATE_MESSAGE);
        return Ok(SaveOutcome::Duplicate);
    }

    let id = store
        .add_bookmark(&request.title, &request.url, DEFAULT_FOLDER)?
        .id
        .clone();
    storage.save(store.library()).await?;

    log::info!("saved bookmark {id} for {}", request.url);
    notifier.notify(SAVED_MESSAGE);
    Ok(SaveOutcome::Saved(id))
}

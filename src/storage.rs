/// Storage gateways for the bookmark library

use std::cell::{Cell, RefCell};

use crate::bookmark::Library;
use crate::config::{BOOKMARKS_KEY, FOLDERS_KEY};
use crate::error::{BookmarkError, BookmarkResult};
use crate::extension;

/// Whole-value load/save of the `bookmarks` and `folders` keys
///
/// There is no partial update: every save writes both collections, and the
/// last save to finish wins.
#[allow(async_fn_in_trait)]
pub trait StorageGateway {
    async fn load(&self) -> BookmarkResult<Library>;

    async fn save(&self, library: &Library) -> BookmarkResult<()>;
}

/// chrome.storage.sync, reached through the extension bridge
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStorage;

impl StorageGateway for SyncStorage {
    async fn load(&self) -> BookmarkResult<Library> {
        let keys = serde_wasm_bindgen::to_value(&[BOOKMARKS_KEY, FOLDERS_KEY])
            .map_err(|e| BookmarkError::Storage(format!("Failed to serialize keys: {:?}", e)))?;

        let stored = extension::get_sync_storage(keys).await?;

        if stored.is_null() || stored.is_undefined() {
            return Ok(Library::default());
        }

        let library: Library = serde_wasm_bindgen::from_value(stored)
            .map_err(|e| BookmarkError::Storage(format!("Failed to parse storage: {:?}", e)))?;

        log::info!(
            "loaded {} bookmark(s), {} folder(s) from sync storage",
            library.bookmarks.len(),
            library.folders.len()
        );
        Ok(library)
    }

    async fn save(&self, library: &Library) -> BookmarkResult<()> {
        let value = serde_wasm_bindgen::to_value(library)
            .map_err(|e| BookmarkError::Storage(format!("Failed to serialize storage: {:?}", e)))?;

        extension::set_sync_storage(value).await?;

        log::info!("saved {} bookmark(s) to sync storage", library.bookmarks.len());
        Ok(())
    }
}

/// In-process storage for tests and hosts without extension storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    library: RefCell<Option<Library>>,
    fail_saves: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: Library) -> Self {
        let storage = Self::new();
        storage.library.replace(Some(library));
        storage
    }

    /// What was last saved, `None` if nothing has been written yet
    pub fn stored(&self) -> Option<Library> {
        self.library.borrow().clone()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageGateway for MemoryStorage {
    async fn load(&self) -> BookmarkResult<Library> {
        Ok(self.library.borrow().clone().unwrap_or_default())
    }

    async fn save(&self, library: &Library) -> BookmarkResult<()> {
        if self.fail_saves.get() {
            return Err(BookmarkError::Storage("QUOTA_BYTES quota exceeded".to_string()));
        }

        self.library.replace(Some(library.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

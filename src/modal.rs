/// Dialog state for the popup: the confirmation prompt and the folder editor

use crate::config::DEFAULT_FOLDER;
use crate::store::BookmarkStore;

/// What the confirmation dialog is waiting on
///
/// Only one request can be pending. A new request replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmDialog {
    #[default]
    Idle,
    PendingDeleteBookmark(String),
    PendingDeleteSelected,
    PendingDeleteFolder(usize),
    PendingClearAll,
}

impl ConfirmDialog {
    pub fn is_pending(&self) -> bool {
        !matches!(self, ConfirmDialog::Idle)
    }

    pub fn request(&mut self, pending: ConfirmDialog) {
        if self.is_pending() {
            log::debug!("replacing pending confirmation {self:?} with {pending:?}");
        }
        *self = pending;
    }

    /// Take the pending action, leaving the dialog idle
    pub fn confirm(&mut self) -> ConfirmDialog {
        std::mem::take(self)
    }

    pub fn cancel(&mut self) {
        *self = ConfirmDialog::Idle;
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConfirmDialog::Idle => "",
            ConfirmDialog::PendingDeleteBookmark(_) => "Delete Bookmark",
            ConfirmDialog::PendingDeleteSelected => "Delete Bookmarks",
            ConfirmDialog::PendingDeleteFolder(_) => "Delete Folder",
            ConfirmDialog::PendingClearAll => "Clear All Data",
        }
    }

    pub fn message(&self, store: &BookmarkStore) -> String {
        match self {
            ConfirmDialog::Idle => String::new(),
            ConfirmDialog::PendingDeleteBookmark(_) => {
                "Are you sure you want to delete this bookmark?".to_string()
            }
            ConfirmDialog::PendingDeleteSelected => format!(
                "Are you sure you want to delete {} bookmark(s)?",
                store.selection_len()
            ),
            ConfirmDialog::PendingDeleteFolder(index) => {
                let Some(name) = store.folders().get(*index) else {
                    return String::new();
                };
                match store.folder_count(name) {
                    0 => format!("Delete \"{name}\"?"),
                    count => format!(
                        "Delete \"{name}\"? {count} bookmark(s) will be moved to Default."
                    ),
                }
            }
            ConfirmDialog::PendingClearAll => {
                "This will delete ALL bookmarks and folders. This action cannot be undone!"
                    .to_string()
            }
        }
    }
}

/// Target of the folder name dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderEditor {
    #[default]
    Closed,
    Creating,
    Renaming(usize),
}

impl FolderEditor {
    pub fn is_open(&self) -> bool {
        !matches!(self, FolderEditor::Closed)
    }

    pub fn open_new(&mut self) {
        *self = FolderEditor::Creating;
    }

    /// Start renaming; "default" and unknown positions are left closed
    pub fn open_rename(&mut self, store: &BookmarkStore, index: usize) {
        match store.folders().get(index) {
            Some(name) if name != DEFAULT_FOLDER => *self = FolderEditor::Renaming(index),
            _ => log::warn!("ignoring rename request for folder #{index}"),
        }
    }

    pub fn dismiss(&mut self) {
        *self = FolderEditor::Closed;
    }

    pub fn title(&self) -> &'static str {
        match self {
            FolderEditor::Renaming(_) => "Rename Folder",
            _ => "New Folder",
        }
    }

    /// Text the name input starts with
    pub fn initial_value(&self, store: &BookmarkStore) -> String {
        match self {
            FolderEditor::Renaming(index) => {
                store.folders().get(*index).cloned().unwrap_or_default()
            }
            _ => String::new(),
        }
    }
}

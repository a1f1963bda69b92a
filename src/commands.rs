/// User commands: mutate a copy of the store, persist it, then hand it back
///
/// The caller only commits the returned store, so a failed save never shows
/// data that was not written.

use chrono::{DateTime, Utc};

use crate::config::EXPORT_FILE_PREFIX;
use crate::error::BookmarkResult;
use crate::modal::{ConfirmDialog, FolderEditor};
use crate::storage::StorageGateway;
use crate::store::BookmarkStore;

async fn write_through<S, T, F>(
    storage: &S,
    store: &BookmarkStore,
    op: F,
) -> BookmarkResult<(BookmarkStore, T)>
where
    S: StorageGateway,
    F: FnOnce(&mut BookmarkStore) -> BookmarkResult<T>,
{
    let mut next = store.clone();
    let output = op(&mut next)?;

    if let Err(e) = storage.save(next.library()).await {
        log::error!("write-through failed, keeping previous state: {e}");
        return Err(e);
    }

    Ok((next, output))
}

pub async fn load<S: StorageGateway>(storage: &S) -> BookmarkResult<BookmarkStore> {
    let library = storage.load().await?;
    Ok(BookmarkStore::from_library(library))
}

pub async fn add_bookmark<S: StorageGateway>(
    storage: &S,
    store: &BookmarkStore,
    title: &str,
    url: &str,
    folder: &str,
) -> BookmarkResult<BookmarkStore> {
    let (next, _) = write_through(storage, store, |s| {
        s.add_bookmark(title, url, folder).map(|_| ())
    })
    .await?;
    Ok(next)
}

/// Create or rename a folder depending on what the editor was opened for
pub async fn save_folder<S: StorageGateway>(
    storage: &S,
    store: &BookmarkStore,
    editor: FolderEditor,
    name: &str,
) -> BookmarkResult<BookmarkStore> {
    let (next, _) = match editor {
        FolderEditor::Closed => return Ok(store.clone()),
        FolderEditor::Creating => write_through(storage, store, |s| s.create_folder(name)).await?,
        FolderEditor::Renaming(index) => {
            write_through(storage, store, |s| s.rename_folder_at(index, name)).await?
        }
    };
    Ok(next)
}

/// Carry out whatever the confirmation dialog was waiting on
pub async fn run_confirmed<S: StorageGateway>(
    storage: &S,
    store: &BookmarkStore,
    confirmed: ConfirmDialog,
) -> BookmarkResult<BookmarkStore> {
    let (next, _) = match confirmed {
        ConfirmDialog::Idle => return Ok(store.clone()),
        ConfirmDialog::PendingDeleteBookmark(id) => {
            write_through(storage, store, |s| Ok(s.delete_bookmark(&id))).await?
        }
        ConfirmDialog::PendingDeleteSelected => {
            write_through(storage, store, |s| Ok(s.delete_selected() > 0)).await?
        }
        ConfirmDialog::PendingDeleteFolder(index) => {
            write_through(storage, store, |s| s.delete_folder(index).map(|moved| moved > 0)).await?
        }
        ConfirmDialog::PendingClearAll => {
            write_through(storage, store, |s| {
                s.clear_all();
                Ok(true)
            })
            .await?
        }
    };
    Ok(next)
}

pub async fn import<S: StorageGateway>(
    storage: &S,
    store: &BookmarkStore,
    raw: &str,
) -> BookmarkResult<BookmarkStore> {
    let (next, _) = write_through(storage, store, |s| s.import_json(raw)).await?;
    Ok(next)
}

/// Export file name and pretty-printed contents
pub fn export(store: &BookmarkStore, now: DateTime<Utc>) -> BookmarkResult<(String, String)> {
    let filename = format!("{EXPORT_FILE_PREFIX}-{}.json", now.format("%Y-%m-%d"));
    Ok((filename, store.export_json()?))
}

/// Error type shared by the store, commands and the background worker

use thiserror::Error;

/// Result type for bookmark operations.
pub type BookmarkResult<T> = Result<T, BookmarkError>;

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("could not parse bookmark data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate bookmark id {0:?}")]
    DuplicateId(String),
    #[error("folder name cannot be blank")]
    BlankFolderName,
    #[error("no folder at position {0}")]
    FolderNotFound(usize),
    #[error("no folder named {0:?}")]
    UnknownFolder(String),
    #[error("the default folder cannot be changed")]
    DefaultFolderProtected,
    #[error("{0:?} is a reserved folder name")]
    ReservedFolderName(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("extension bridge error: {0}")]
    Bridge(String),
}

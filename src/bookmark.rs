/// Data structures for Owl Bookmarks
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{DEFAULT_FOLDER, FAVICON_ENDPOINT, FAVICON_SIZE};
use crate::error::{BookmarkError, BookmarkResult};

/// A saved page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub folder: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub created_at: String,
}

impl Bookmark {
    /// Build a bookmark, rejecting urls that do not parse
    pub fn new(
        id: String,
        title: impl Into<String>,
        url: &str,
        folder: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> BookmarkResult<Bookmark> {
        let favicon = favicon_url(url)?;

        Ok(Bookmark {
            id,
            title: title.into(),
            url: url.to_string(),
            folder: folder.into(),
            favicon,
            created_at: iso_timestamp(created_at),
        })
    }
}

/// Everything persisted to storage and written to export files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawLibrary")]
pub struct Library {
    pub bookmarks: Vec<Bookmark>,
    pub folders: Vec<String>,
}

impl Library {
    pub fn new(bookmarks: Vec<Bookmark>, folders: Vec<String>) -> Self {
        let mut library = Library { bookmarks, folders };
        library.ensure_default_folder();
        library
    }

    /// Put "default" back at the front if the folder list lost it
    pub fn ensure_default_folder(&mut self) {
        if !self.folders.iter().any(|f| f == DEFAULT_FOLDER) {
            log::warn!("folder list had no {DEFAULT_FOLDER:?} folder, restoring it");
            self.folders.insert(0, DEFAULT_FOLDER.to_string());
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Library {
            bookmarks: Vec::new(),
            folders: vec![DEFAULT_FOLDER.to_string()],
        }
    }
}

// Stored and imported data may omit either key or hold null
#[derive(Deserialize)]
struct RawLibrary {
    #[serde(default)]
    bookmarks: Option<Vec<Bookmark>>,
    #[serde(default)]
    folders: Option<Vec<String>>,
}

impl From<RawLibrary> for Library {
    fn from(raw: RawLibrary) -> Self {
        let defaults = Library::default();
        Library::new(
            raw.bookmarks.unwrap_or(defaults.bookmarks),
            raw.folders.unwrap_or(defaults.folders),
        )
    }
}

/// Hands out time-derived ids that never repeat, even within one millisecond
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next_id(&mut self, now_millis: i64, taken: impl Fn(&str) -> bool) -> String {
        let mut candidate = now_millis.max(self.last + 1);
        while taken(&candidate.to_string()) {
            candidate += 1;
        }
        self.last = candidate;
        candidate.to_string()
    }
}

/// Favicon service url for the host of `url`
pub fn favicon_url(url: &str) -> BookmarkResult<String> {
    let parsed = Url::parse(url).map_err(|source| BookmarkError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let host = parsed.host_str().unwrap_or_default();

    Ok(format!("{FAVICON_ENDPOINT}?domain={host}&sz={FAVICON_SIZE}"))
}

/// Host shown under a bookmark title; unparseable urls are shown as-is
pub fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

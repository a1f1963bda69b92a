/// In-memory bookmark state and every mutation the popup can perform
use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};

use crate::bookmark::{Bookmark, IdGenerator, Library};
use crate::config::DEFAULT_FOLDER;
use crate::error::{BookmarkError, BookmarkResult};

/// Which folder the bookmark list is narrowed to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolderFilter {
    #[default]
    All,
    Folder(String),
}

impl FolderFilter {
    pub fn matches(&self, folder: &str) -> bool {
        match self {
            FolderFilter::All => true,
            FolderFilter::Folder(name) => name == folder,
        }
    }
}

/// Popup state: the persisted library plus selection and filters
///
/// Mutations only touch memory. Callers persist `library()` afterwards
/// (see `commands`), so a store that failed to save can simply be dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkStore {
    library: Library,
    selection: BTreeSet<String>,
    folder_filter: FolderFilter,
    search_query: String,
    ids: IdGenerator,
}

impl BookmarkStore {
    pub fn from_library(library: Library) -> Self {
        BookmarkStore {
            library,
            ..Default::default()
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.library.bookmarks
    }

    pub fn folders(&self) -> &[String] {
        &self.library.folders
    }

    pub fn find(&self, id: &str) -> Option<&Bookmark> {
        self.library.bookmarks.iter().find(|b| b.id == id)
    }

    /// `folder` if it still exists, otherwise "default"
    pub fn folder_or_default<'a>(&'a self, folder: &'a str) -> &'a str {
        if self.library.folders.iter().any(|f| f == folder) {
            folder
        } else {
            DEFAULT_FOLDER
        }
    }

    pub fn folder_count(&self, folder: &str) -> usize {
        self.library
            .bookmarks
            .iter()
            .filter(|b| b.folder == folder)
            .count()
    }

    // Bookmarks

    pub fn add_bookmark(
        &mut self,
        title: &str,
        url: &str,
        folder: &str,
    ) -> BookmarkResult<&Bookmark> {
        self.add_bookmark_at(title, url, folder, Utc::now())
    }

    pub fn add_bookmark_at(
        &mut self,
        title: &str,
        url: &str,
        folder: &str,
        now: DateTime<Utc>,
    ) -> BookmarkResult<&Bookmark> {
        let bookmarks = &self.library.bookmarks;
        let id = self
            .ids
            .next_id(now.timestamp_millis(), |candidate| {
                bookmarks.iter().any(|b| b.id == candidate)
            });

        let bookmark = Bookmark::new(id, title, url, folder, now)?;
        log::debug!("adding bookmark {} to {:?}", bookmark.id, bookmark.folder);

        self.library.bookmarks.push(bookmark);
        let last = self.library.bookmarks.len() - 1;
        Ok(&self.library.bookmarks[last])
    }

    pub fn bookmark_exists(&self, url: &str) -> bool {
        self.library.bookmarks.iter().any(|b| b.url == url)
    }

    pub fn delete_bookmark(&mut self, id: &str) -> bool {
        let original_len = self.library.bookmarks.len();
        self.library.bookmarks.retain(|b| b.id != id);
        self.selection.remove(id);
        self.library.bookmarks.len() < original_len
    }

    /// Remove every bookmark whose id is in `ids`, returning how many went
    pub fn delete_bookmarks(&mut self, ids: &BTreeSet<String>) -> usize {
        let original_len = self.library.bookmarks.len();
        self.library.bookmarks.retain(|b| !ids.contains(&b.id));
        self.selection.retain(|id| !ids.contains(id));
        original_len - self.library.bookmarks.len()
    }

    pub fn delete_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selection);
        self.delete_bookmarks(&selected)
    }

    // Folders

    pub fn create_folder(&mut self, name: &str) -> BookmarkResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookmarkError::BlankFolderName);
        }
        if name == DEFAULT_FOLDER {
            return Err(BookmarkError::ReservedFolderName(name.to_string()));
        }

        // Duplicate names are accepted, folders are addressed by position
        self.library.folders.push(name.to_string());
        Ok(())
    }

    pub fn rename_folder(&mut self, old_name: &str, new_name: &str) -> BookmarkResult<()> {
        let index = self
            .library
            .folders
            .iter()
            .position(|f| f == old_name)
            .ok_or_else(|| BookmarkError::UnknownFolder(old_name.to_string()))?;
        self.rename_folder_at(index, new_name)
    }

    /// Rename the folder at `index` in place and move its bookmarks along
    pub fn rename_folder_at(&mut self, index: usize, new_name: &str) -> BookmarkResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(BookmarkError::BlankFolderName);
        }
        if new_name == DEFAULT_FOLDER {
            return Err(BookmarkError::ReservedFolderName(new_name.to_string()));
        }

        let old_name = self
            .library
            .folders
            .get(index)
            .cloned()
            .ok_or(BookmarkError::FolderNotFound(index))?;
        if old_name == DEFAULT_FOLDER {
            return Err(BookmarkError::DefaultFolderProtected);
        }

        self.library.folders[index] = new_name.to_string();
        for bookmark in self.library.bookmarks.iter_mut().filter(|b| b.folder == old_name) {
            bookmark.folder = new_name.to_string();
        }

        if self.folder_filter == FolderFilter::Folder(old_name.clone()) {
            self.folder_filter = FolderFilter::Folder(new_name.to_string());
        }

        log::debug!("renamed folder {old_name:?} to {new_name:?}");
        Ok(())
    }

    /// Delete the folder at `index`, returning how many bookmarks moved to "default"
    pub fn delete_folder(&mut self, index: usize) -> BookmarkResult<usize> {
        let name = self
            .library
            .folders
            .get(index)
            .cloned()
            .ok_or(BookmarkError::FolderNotFound(index))?;
        if name == DEFAULT_FOLDER {
            return Err(BookmarkError::DefaultFolderProtected);
        }

        let mut moved = 0;
        for bookmark in self.library.bookmarks.iter_mut().filter(|b| b.folder == name) {
            bookmark.folder = DEFAULT_FOLDER.to_string();
            moved += 1;
        }
        self.library.folders.remove(index);

        if self.folder_filter == FolderFilter::Folder(name.clone()) {
            self.folder_filter = FolderFilter::All;
        }

        log::debug!("deleted folder {name:?}, moved {moved} bookmark(s) to {DEFAULT_FOLDER:?}");
        Ok(moved)
    }

    pub fn clear_all(&mut self) {
        self.library = Library::default();
        self.selection.clear();
        self.folder_filter = FolderFilter::All;
    }

    // Import / export

    /// Replace the library with the contents of an export file
    ///
    /// Leaves the store untouched when the JSON is malformed or repeats an id.
    pub fn import_json(&mut self, raw: &str) -> BookmarkResult<()> {
        let library: Library = serde_json::from_str(raw)?;

        let mut seen = HashSet::new();
        if let Some(dup) = library.bookmarks.iter().find(|b| !seen.insert(b.id.as_str())) {
            return Err(BookmarkError::DuplicateId(dup.id.clone()));
        }

        log::info!(
            "imported {} bookmark(s) in {} folder(s)",
            library.bookmarks.len(),
            library.folders.len()
        );
        self.library = library;
        self.selection.clear();
        self.folder_filter = FolderFilter::All;
        Ok(())
    }

    pub fn export_json(&self) -> BookmarkResult<String> {
        Ok(serde_json::to_string_pretty(&self.library)?)
    }

    // Selection

    pub fn toggle_selection(&mut self, id: &str) {
        if !self.selection.remove(id) && self.find(id).is_some() {
            self.selection.insert(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    // Filters

    pub fn folder_filter(&self) -> &FolderFilter {
        &self.folder_filter
    }

    pub fn set_folder_filter(&mut self, filter: FolderFilter) {
        self.folder_filter = filter;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn store_with(entries: &[(&str, &str, &str)]) -> BookmarkStore {
        let mut store = BookmarkStore::default();
        for (i, (title, url, folder)) in entries.iter().enumerate() {
            store
                .add_bookmark_at(title, url, folder, at(1_000 + i as i64))
                .unwrap();
        }
        store
    }

    fn ids(store: &BookmarkStore) -> Vec<String> {
        store.bookmarks().iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn test_add_bookmark_scenario() {
        let mut store = BookmarkStore::default();
        assert!(store.bookmarks().is_empty());
        assert_eq!(store.folders(), ["default".to_string()]);

        let bookmark = store
            .add_bookmark("Example", "https://example.com", "default")
            .unwrap()
            .clone();

        assert_eq!(store.bookmarks().len(), 1);
        assert_eq!(bookmark.folder, "default");
        assert!(bookmark.favicon.contains("example.com"));

        let before = store.clone();
        let result = store.delete_folder(0);
        assert!(matches!(result, Err(BookmarkError::DefaultFolderProtected)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_bookmark_invalid_url_leaves_store() {
        let mut store = BookmarkStore::default();
        assert!(store.add_bookmark("Bad", "example dot com", "default").is_err());
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn test_ids_unique_across_adds_and_deletes() {
        let mut store = BookmarkStore::default();
        for i in 0..20 {
            store
                .add_bookmark_at("t", &format!("https://site{i}.com"), "default", at(5_000))
                .unwrap();
            if i % 3 == 0 {
                let first = store.bookmarks()[0].id.clone();
                store.delete_bookmark(&first);
            }
        }

        let all = ids(&store);
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = store_with(&[
            ("A", "https://a.com", "default"),
            ("B", "https://b.com", "default"),
            ("C", "https://c.com", "default"),
        ]);

        let titles: Vec<&str> = store.bookmarks().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_bookmark_exists_exact_match() {
        let store = store_with(&[("GitHub", "https://github.com", "default")]);

        assert!(store.bookmark_exists("https://github.com"));
        assert!(!store.bookmark_exists("https://github.com/"));
        assert!(!store.bookmark_exists("https://GitHub.com"));
    }

    #[test]
    fn test_delete_bookmark_missing_is_noop() {
        let mut store = store_with(&[("A", "https://a.com", "default")]);
        assert!(!store.delete_bookmark("nope"));
        assert_eq!(store.bookmarks().len(), 1);
    }

    #[test]
    fn test_selection_pruned_on_delete() {
        let mut store = BookmarkStore::default();
        for (i, id_millis) in [1, 2, 3].iter().enumerate() {
            store
                .add_bookmark_at("t", &format!("https://{i}.com"), "default", at(*id_millis))
                .unwrap();
        }
        assert_eq!(ids(&store), vec!["1", "2", "3"]);

        store.toggle_selection("1");
        store.toggle_selection("3");
        store.delete_bookmark("3");

        assert_eq!(store.selection().iter().collect::<Vec<_>>(), vec!["1"]);
        assert!(store.find("1").is_some());

        let removed = store.delete_selected();
        assert_eq!(removed, 1);
        assert_eq!(store.selection_len(), 0);
        assert_eq!(ids(&store), vec!["2"]);
    }

    #[test]
    fn test_toggle_selection_flips_and_ignores_unknown() {
        let mut store = store_with(&[("A", "https://a.com", "default")]);
        let id = store.bookmarks()[0].id.clone();

        store.toggle_selection(&id);
        assert!(store.is_selected(&id));
        store.toggle_selection(&id);
        assert!(!store.is_selected(&id));

        store.toggle_selection("ghost");
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_delete_folder_cascades_to_default() {
        let mut store = store_with(&[
            ("A", "https://a.com", "work"),
            ("B", "https://b.com", "default"),
            ("C", "https://c.com", "work"),
            ("D", "https://d.com", "home"),
        ]);
        store.create_folder("work").unwrap();
        store.create_folder("home").unwrap();

        let default_before = store.folder_count("default");
        let work_before = store.folder_count("work");

        let moved = store.delete_folder(1).unwrap();

        assert_eq!(moved, work_before);
        assert_eq!(store.folder_count("default"), default_before + work_before);
        assert_eq!(store.folder_count("work"), 0);
        assert_eq!(store.folders(), ["default".to_string(), "home".to_string()]);
        assert_eq!(store.folder_count("home"), 1);
    }

    #[test]
    fn test_delete_folder_out_of_range() {
        let mut store = BookmarkStore::default();
        assert!(matches!(store.delete_folder(4), Err(BookmarkError::FolderNotFound(4))));
        assert_eq!(store.folders().len(), 1);
    }

    #[test]
    fn test_delete_folder_resets_filter() {
        let mut store = BookmarkStore::default();
        store.create_folder("work").unwrap();
        store.set_folder_filter(FolderFilter::Folder("work".to_string()));

        store.delete_folder(1).unwrap();

        assert_eq!(store.folder_filter(), &FolderFilter::All);
    }

    #[test]
    fn test_rename_folder_cascades() {
        let mut store = store_with(&[
            ("A", "https://a.com", "work"),
            ("B", "https://b.com", "default"),
            ("C", "https://c.com", "work"),
        ]);
        store.create_folder("work").unwrap();
        store.create_folder("home").unwrap();
        store.set_folder_filter(FolderFilter::Folder("work".to_string()));

        store.rename_folder("work", "  projects ").unwrap();

        assert_eq!(
            store.folders(),
            ["default".to_string(), "projects".to_string(), "home".to_string()]
        );
        assert_eq!(store.folder_count("work"), 0);
        assert_eq!(store.folder_count("projects"), 2);
        assert!(store.bookmarks().iter().all(|b| store.folders().contains(&b.folder)));
        assert_eq!(store.folder_filter(), &FolderFilter::Folder("projects".to_string()));
    }

    #[test]
    fn test_rename_folder_rejections() {
        let mut store = BookmarkStore::default();
        store.create_folder("work").unwrap();

        assert!(matches!(store.rename_folder("work", "   "), Err(BookmarkError::BlankFolderName)));
        assert!(matches!(
            store.rename_folder("default", "other"),
            Err(BookmarkError::DefaultFolderProtected)
        ));
        assert!(matches!(
            store.rename_folder("missing", "other"),
            Err(BookmarkError::UnknownFolder(_))
        ));
        assert!(matches!(store.rename_folder_at(9, "x"), Err(BookmarkError::FolderNotFound(9))));
        assert_eq!(store.folders(), ["default".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_default_name_is_reserved() {
        let mut store = BookmarkStore::default();
        store.create_folder("work").unwrap();

        assert!(matches!(
            store.create_folder(" default "),
            Err(BookmarkError::ReservedFolderName(_))
        ));
        assert!(matches!(
            store.rename_folder_at(1, "default"),
            Err(BookmarkError::ReservedFolderName(_))
        ));
        assert_eq!(store.folders(), ["default".to_string(), "work".to_string()]);
        assert_eq!(store.delete_folder(1).unwrap(), 0);
    }

    #[test]
    fn test_folder_or_default_after_folder_removed() {
        let mut store = BookmarkStore::default();
        store.create_folder("work").unwrap();
        assert_eq!(store.folder_or_default("work"), "work");

        store.delete_folder(1).unwrap();

        assert_eq!(store.folder_or_default("work"), "default");
        let folder = store.folder_or_default("work").to_string();
        store.add_bookmark("A", "https://a.com", &folder).unwrap();
        assert_eq!(store.bookmarks()[0].folder, "default");
    }

    #[test]
    fn test_create_folder_allows_duplicates() {
        let mut store = BookmarkStore::default();
        store.create_folder("work").unwrap();
        store.create_folder("work").unwrap();

        assert_eq!(store.folders().len(), 3);
        assert!(matches!(store.create_folder(" \t"), Err(BookmarkError::BlankFolderName)));
        assert_eq!(store.folders().len(), 3);
    }

    #[test]
    fn test_clear_all() {
        let mut store = store_with(&[("A", "https://a.com", "work")]);
        store.create_folder("work").unwrap();
        let id = store.bookmarks()[0].id.clone();
        store.toggle_selection(&id);

        store.clear_all();

        assert!(store.bookmarks().is_empty());
        assert_eq!(store.folders(), ["default".to_string()]);
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = store_with(&[
            ("GitHub", "https://github.com", "dev"),
            ("Docs", "https://docs.rs", "default"),
        ]);
        store.create_folder("dev").unwrap();

        let exported = store.export_json().unwrap();
        assert!(exported.contains("\n  \"bookmarks\""));

        let mut other = BookmarkStore::default();
        other.import_json(&exported).unwrap();

        assert_eq!(other.bookmarks(), store.bookmarks());
        assert_eq!(other.folders(), store.folders());
    }

    #[test]
    fn test_import_malformed_leaves_state() {
        let mut store = store_with(&[("A", "https://a.com", "default")]);
        let before = store.clone();

        let result = store.import_json("{ not json");

        assert!(matches!(result, Err(BookmarkError::Parse(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut store = BookmarkStore::default();
        let raw = r#"{
            "bookmarks": [
                {"id": "1", "title": "A", "url": "https://a.com", "folder": "default"},
                {"id": "1", "title": "B", "url": "https://b.com", "folder": "default"}
            ],
            "folders": ["default"]
        }"#;

        assert!(matches!(store.import_json(raw), Err(BookmarkError::DuplicateId(id)) if id == "1"));
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn test_import_replaces_wholesale_and_clears_selection() {
        let mut store = store_with(&[("Old", "https://old.com", "default")]);
        let id = store.bookmarks()[0].id.clone();
        store.toggle_selection(&id);

        store
            .import_json(
                r#"{
                    "bookmarks": [
                        {"id": "9", "title": "New", "url": "https://new.com", "folder": "x"}
                    ],
                    "folders": ["x"]
                }"#,
            )
            .unwrap();

        assert_eq!(ids(&store), vec!["9"]);
        assert_eq!(store.folders(), ["default".to_string(), "x".to_string()]);
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_new_ids_avoid_imported_ones() {
        let mut store = BookmarkStore::default();
        store
            .import_json(
                r#"{"bookmarks": [
                    {"id": "2000", "title": "T", "url": "https://t.com", "folder": "default"}
                ]}"#,
            )
            .unwrap();

        let id = store
            .add_bookmark_at("U", "https://u.com", "default", at(2000))
            .unwrap()
            .id
            .clone();

        assert_eq!(id, "2001");
    }

    #[test]
    fn test_folder_filter_matches() {
        assert!(FolderFilter::All.matches("anything"));
        assert!(!FolderFilter::Folder("a".to_string()).matches("b"));
    }
}

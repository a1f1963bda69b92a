/// Pure projections from store state to what the popup displays
use crate::bookmark::{Bookmark, display_host};
use crate::config::DEFAULT_FOLDER;
use crate::store::{BookmarkStore, FolderFilter};

/// Shown in place of a favicon that failed to load
pub const FAVICON_PLACEHOLDER: &str = "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 24 24%22><text y=%2218%22 font-size=%2218%22>🔖</text></svg>";

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub host: String,
    pub favicon: String,
    pub selected: bool,
}

/// Why the list has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoBookmarks,
    FolderEmpty,
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoBookmarks => "No bookmarks yet. Start adding!",
            EmptyState::FolderEmpty => "This folder is empty.",
            EmptyState::NoMatches => "No bookmarks found",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkList {
    Items {
        rows: Vec<BookmarkRow>,
        selected_count: usize,
    },
    Empty(EmptyState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderTab {
    pub label: String,
    pub filter: FolderFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderSummary {
    pub index: usize,
    pub name: String,
    pub count: usize,
    pub editable: bool,
}

impl FolderSummary {
    pub fn count_label(&self) -> String {
        count_label(self.count)
    }
}

/// Narrow by folder, then by a case-insensitive title/url search
///
/// Relative order is preserved; an empty query matches everything.
pub fn filter_bookmarks<'a>(
    bookmarks: &'a [Bookmark],
    filter: &FolderFilter,
    query: &str,
) -> Vec<&'a Bookmark> {
    let query = query.to_lowercase();

    bookmarks
        .iter()
        .filter(|b| filter.matches(&b.folder))
        .filter(|b| {
            query.is_empty()
                || b.title.to_lowercase().contains(&query)
                || b.url.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn render_list(store: &BookmarkStore) -> BookmarkList {
    let visible = filter_bookmarks(store.bookmarks(), store.folder_filter(), store.search_query());

    if visible.is_empty() {
        let empty = if !store.search_query().is_empty() {
            EmptyState::NoMatches
        } else if store.bookmarks().is_empty() {
            EmptyState::NoBookmarks
        } else {
            EmptyState::FolderEmpty
        };
        return BookmarkList::Empty(empty);
    }

    let rows = visible
        .into_iter()
        .map(|b| BookmarkRow {
            id: b.id.clone(),
            title: b.title.clone(),
            url: b.url.clone(),
            host: display_host(&b.url),
            favicon: b.favicon.clone(),
            selected: store.is_selected(&b.id),
        })
        .collect();

    BookmarkList::Items {
        rows,
        selected_count: store.selection_len(),
    }
}

pub fn folder_tabs(store: &BookmarkStore) -> Vec<FolderTab> {
    let current = store.folder_filter();

    std::iter::once(FolderTab {
        label: "All".to_string(),
        filter: FolderFilter::All,
        active: *current == FolderFilter::All,
    })
    .chain(store.folders().iter().map(|name| {
        let filter = FolderFilter::Folder(name.clone());
        FolderTab {
            label: name.clone(),
            active: *current == filter,
            filter,
        }
    }))
    .collect()
}

pub fn folder_summaries(store: &BookmarkStore) -> Vec<FolderSummary> {
    store
        .folders()
        .iter()
        .enumerate()
        .map(|(index, name)| FolderSummary {
            index,
            name: name.clone(),
            count: store.folder_count(name),
            editable: name != DEFAULT_FOLDER,
        })
        .collect()
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 bookmark".to_string()
    } else {
        format!("{count} bookmarks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_store() -> BookmarkStore {
        let mut store = BookmarkStore::default();
        store.create_folder("dev").unwrap();
        store.create_folder("news").unwrap();
        let entries = [
            ("GitHub", "https://github.com", "dev"),
            ("BBC News", "https://www.bbc.co.uk/news", "news"),
            ("Rust Docs", "https://doc.rust-lang.org", "dev"),
            ("Example", "https://example.com", "default"),
        ];
        for (i, (title, url, folder)) in entries.iter().enumerate() {
            let now = Utc.timestamp_millis_opt(10 + i as i64).unwrap();
            store.add_bookmark_at(title, url, folder, now).unwrap();
        }
        store
    }

    fn titles(bookmarks: &[&Bookmark]) -> Vec<String> {
        bookmarks.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let store = sample_store();
        let visible = filter_bookmarks(store.bookmarks(), &FolderFilter::All, "");
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn test_filter_by_folder_exact_subset() {
        let store = sample_store();
        let dev = FolderFilter::Folder("dev".to_string());
        let visible = filter_bookmarks(store.bookmarks(), &dev, "");

        assert_eq!(titles(&visible), vec!["GitHub", "Rust Docs"]);
        assert!(visible.iter().all(|b| b.folder == "dev"));
    }

    #[test]
    fn test_search_case_insensitive_title_or_url() {
        let store = sample_store();

        let visible = filter_bookmarks(store.bookmarks(), &FolderFilter::All, "github");
        assert_eq!(titles(&visible), vec!["GitHub"]);

        let visible = filter_bookmarks(store.bookmarks(), &FolderFilter::All, "BBC.CO");
        assert_eq!(titles(&visible), vec!["BBC News"]);

        let visible = filter_bookmarks(store.bookmarks(), &FolderFilter::All, "docs");
        assert_eq!(titles(&visible), vec!["Rust Docs"]);
    }

    #[test]
    fn test_folder_and_search_combine() {
        let store = sample_store();
        let news = FolderFilter::Folder("news".to_string());
        let visible = filter_bookmarks(store.bookmarks(), &news, "rust");
        assert!(visible.is_empty());
    }

    #[test]
    fn test_render_list_rows_and_selection() {
        let mut store = sample_store();
        let id = store.bookmarks()[1].id.clone();
        store.toggle_selection(&id);
        store.set_folder_filter(FolderFilter::Folder("news".to_string()));

        match render_list(&store) {
            BookmarkList::Items { rows, selected_count } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].host, "www.bbc.co.uk");
                assert!(rows[0].selected);
                assert_eq!(selected_count, 1);
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_render_list_is_idempotent() {
        let store = sample_store();
        assert_eq!(render_list(&store), render_list(&store));
    }

    #[test]
    fn test_empty_states_differ() {
        let empty = BookmarkStore::default();
        assert_eq!(render_list(&empty), BookmarkList::Empty(EmptyState::NoBookmarks));

        let mut store = sample_store();
        store.set_search_query("zzz");
        assert_eq!(render_list(&store), BookmarkList::Empty(EmptyState::NoMatches));

        let mut store = sample_store();
        store.create_folder("empty").unwrap();
        store.set_folder_filter(FolderFilter::Folder("empty".to_string()));
        assert_eq!(render_list(&store), BookmarkList::Empty(EmptyState::FolderEmpty));

        assert_ne!(EmptyState::NoBookmarks.message(), EmptyState::NoMatches.message());
    }

    #[test]
    fn test_folder_tabs_marks_active() {
        let mut store = sample_store();
        store.set_folder_filter(FolderFilter::Folder("news".to_string()));

        let tabs = folder_tabs(&store);
        let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();

        assert_eq!(labels, vec!["All", "default", "dev", "news"]);
        assert_eq!(tabs.iter().filter(|t| t.active).count(), 1);
        assert!(tabs[3].active);
    }

    #[test]
    fn test_folder_summaries() {
        let store = sample_store();
        let summaries = folder_summaries(&store);

        assert_eq!(summaries[0].name, "default");
        assert!(!summaries[0].editable);
        assert_eq!(summaries[0].count_label(), "1 bookmark");
        assert_eq!(summaries[1].count_label(), "2 bookmarks");
        assert!(summaries[1].editable);
        assert_eq!(count_label(0), "0 bookmarks");
    }
}

/// Compile-time settings for Owl Bookmarks

/// Storage key holding the bookmark array
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Storage key holding the folder name array
pub const FOLDERS_KEY: &str = "folders";

/// Folder that always exists and receives bookmarks from deleted folders
pub const DEFAULT_FOLDER: &str = "default";

pub const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";
pub const FAVICON_SIZE: u32 = 64;

pub const EXPORT_FILE_PREFIX: &str = "owl-bookmarks";

pub const NOTIFICATION_TITLE: &str = "Owl Bookmarks";
pub const NOTIFICATION_ICON: &str = "icons/icon48.png";

/// How long the popup success banner stays visible
pub const SUCCESS_BANNER_MS: i32 = 3000;

// Context menu and keyboard command ids, must match manifest.json
pub const MENU_SAVE_PAGE: &str = "saveToOwlBookmarks";
pub const MENU_SAVE_LINK: &str = "saveToOwlBookmarksLink";
pub const COMMAND_SAVE_BOOKMARK: &str = "save-bookmark";

//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// On-disk locations
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "linkboard";

    /// Key-value store holding cards, mode and settings
    pub const STORE_FILENAME: &str = "store.json";

    /// Window geometry record (kept outside the key-value store)
    pub const BOUNDS_FILENAME: &str = "window-bounds.json";
}

/// Key-value store keys
pub mod keys {
    pub const WEB_CARDS: &str = "linkboardWebCards";
    pub const FOLDER_CARDS: &str = "linkboardFolderCards";
    pub const ACTIVE_MODE: &str = "linkboardActiveMode";
    pub const SETTINGS: &str = "linkboardSettings";

    /// Pre-modes single card array, migrated into `WEB_CARDS`
    pub const LEGACY_CARDS: &str = "linkboardCards";

    /// Obsolete sections record, dropped at load
    pub const LEGACY_SECTIONS: &str = "linkboardSections";
}

/// Window geometry limits
pub mod window {
    pub const MIN_WIDTH: u32 = 400;
    pub const MIN_HEIGHT: u32 = 300;

    /// Used when no saved bounds exist or they cannot be read
    pub const DEFAULT_WIDTH: u32 = 1000;
    pub const DEFAULT_HEIGHT: u32 = 700;

    pub const TITLE: &str = "LinkBoard";
}

/// Time-based coordination
pub mod timing {
    use std::time::Duration;

    /// Always-on-top is forced for this long after opening an external target
    pub const OPENING_GRACE_PERIOD: Duration = Duration::from_secs(2);

    /// Resize deltas arriving within this window are sent as one request
    pub const RESIZE_COALESCE_INTERVAL: Duration = Duration::from_millis(16);

    /// Window-system reports older than our last geometry command are ignored for this long
    pub const GEOMETRY_SETTLE_PERIOD: Duration = Duration::from_millis(500);
}

/// Setting defaults
pub mod defaults {
    pub const THEME_COLOR: &str = "#5eb5b4";
    pub const CANVAS_OPACITY: f32 = 1.0;
}

/// Card presentation
pub mod cards {
    /// Background when a card has no theme color
    pub const DEFAULT_BACKGROUND: &str = "#0a0a0a";

    /// Title color when a card has no theme color
    pub const DEFAULT_TITLE_COLOR: &str = "#d0d0d0";

    /// Favicon service; `{}` is replaced with the hostname
    pub const FAVICON_URL_TEMPLATE: &str = "https://www.google.com/s2/favicons?domain={}&sz=128";

    /// Scheme prepended to web targets typed without one
    pub const DEFAULT_URL_SCHEME: &str = "https://";

    /// Extensions offered by the image picker
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];
}

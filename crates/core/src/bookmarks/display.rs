//! Per-record fields exposed to renderers.
//!
//! Truncation happens here and only here; stored titles are never shortened.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Bookmark;

/// Display options, usually derived from [`crate::config::AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Maximum title length in characters before the ellipsis.
    pub title_chars: usize,
    /// Icon used when a record has no favicon.
    pub default_favicon: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { title_chars: 40, default_favicon: "images/favicon.png".into() }
    }
}

/// A bookmark projected for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkView {
    pub key: String,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub scroll_top: u64,
}

impl LinkView {
    pub fn new(bookmark: &Bookmark, options: &DisplayOptions) -> Self {
        Self {
            key: bookmark.key.clone(),
            url: bookmark.url.clone(),
            title: truncate_title(&bookmark.title, options.title_chars),
            favicon: bookmark
                .favicon
                .clone()
                .filter(|icon| !icon.is_empty())
                .unwrap_or_else(|| options.default_favicon.clone()),
            scroll_top: bookmark.scroll_top,
        }
    }
}

/// Shorten `title` to `max_chars` characters followed by `...`.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}

/// Extension badge text: the count, capped at `99+`.
pub fn badge_text(count: usize) -> String {
    if count > 99 { "99+".to_string() } else { count.to_string() }
}

/// The status summary a message reverts to.
pub fn summary_text(count: usize) -> String {
    format!("Total links: {count}")
}

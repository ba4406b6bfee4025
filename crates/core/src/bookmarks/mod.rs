//! Bookmark records and the synchronized store that holds them.

pub mod display;
pub mod schema;
pub mod store;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use display::{DisplayOptions, LinkView, badge_text, summary_text, truncate_title};
pub use store::BookmarkStore;

/// A saved page.
///
/// `key` is the storage key and always equals `url` for records written by
/// this crate. Records read back from the durable layer get the key they
/// were stored under, whatever the value itself claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(default)]
    pub key: String,
    pub url: String,
    pub title: String,
    pub scroll_top: u64,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl Bookmark {
    /// Bookmark `url` at `scroll_top`, stamped with the current time.
    pub fn new(url: impl Into<String>, title: impl Into<String>, scroll_top: u64) -> Self {
        let url = url.into();
        Self {
            key: url.clone(),
            url,
            title: title.into(),
            scroll_top,
            timestamp: chrono::Utc::now().timestamp_millis(),
            favicon: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }
}

/// Result of [`BookmarkStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// The record was persisted and appended to the cache.
    Added,
    /// A record already existed under the key; nothing changed.
    AlreadyExists,
}

impl AddOutcome {
    /// Status text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            AddOutcome::Added => "Saved!",
            AddOutcome::AlreadyExists => "Link Exists",
        }
    }
}

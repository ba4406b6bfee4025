//! Messages passed from the UI context to the page-opening coordinator.
//!
//! On the wire a request is a JSON object tagged by `action`:
//!
//! ```json
//! { "action": "open", "url": "https://a.test", "scroll": 120 }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bookmarks::Bookmark;

/// A request for the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    /// Open `url` in a new viewing context and restore `scroll` once loaded.
    Open { url: String, scroll: u64 },
}

impl Request {
    /// Request reopening a saved bookmark at its saved offset.
    pub fn open(bookmark: &Bookmark) -> Self {
        Request::Open { url: bookmark.url.clone(), scroll: bookmark.scroll_top }
    }
}

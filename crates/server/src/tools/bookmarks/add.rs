//! bookmark_add tool implementation.
//!
//! Saves a page unless a bookmark for the same URL already exists.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use readlater_client::page_url;
use readlater_core::{AddOutcome, Bookmark, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the bookmark_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkAddParams {
    /// Page address; also the bookmark's key.
    pub url: String,

    /// Page title at save time.
    #[serde(default)]
    pub title: String,

    /// Vertical scroll offset to restore.
    #[serde(default)]
    pub scroll_top: u64,

    /// Optional icon URL.
    #[serde(default)]
    pub favicon: Option<String>,
}

/// Output from the bookmark_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkAddOutput {
    pub outcome: AddOutcome,
    pub message: String,
    pub key: String,
    pub total: usize,
}

/// Implementation of the bookmark_add tool.
pub async fn add_impl(state: &AppState, params: BookmarkAddParams) -> Result<CallToolResult, McpError> {
    page_url(&params.url).map_err(Error::from)?;

    let url = params.url.trim().to_string();
    let title = if params.title.is_empty() { url.clone() } else { params.title };
    let mut bookmark = Bookmark::new(url, title, params.scroll_top);
    if let Some(favicon) = params.favicon.filter(|f| !f.is_empty()) {
        bookmark = bookmark.with_favicon(favicon);
    }
    let key = bookmark.key.clone();

    let (outcome, total) = {
        let mut store = state.store().await;
        let outcome = store.add(bookmark).await?;
        (outcome, store.count())
    };
    state.announce(outcome.message(), total);

    let output = BookmarkAddOutput { outcome, message: outcome.message().to_string(), key, total };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{output, state_with};
    use readlater_core::{DurableLayer, MemoryLayer};

    fn params(url: &str) -> BookmarkAddParams {
        BookmarkAddParams { url: url.to_string(), title: "A".to_string(), scroll_top: 120, favicon: None }
    }

    #[tokio::test]
    async fn test_add_then_duplicate() {
        let layer = MemoryLayer::new();
        let state = state_with(layer.clone()).await;

        let first: BookmarkAddOutput = output(&add_impl(&state, params("https://a.test")).await.unwrap());
        assert_eq!(first.outcome, AddOutcome::Added);
        assert_eq!(first.message, "Saved!");
        assert_eq!(first.total, 1);

        let second: BookmarkAddOutput = output(&add_impl(&state, params("https://a.test")).await.unwrap());
        assert_eq!(second.outcome, AddOutcome::AlreadyExists);
        assert_eq!(second.message, "Link Exists");
        assert_eq!(second.total, 1);

        assert_eq!(layer.len(), 1);
        assert_eq!(state.status().0, "Link Exists");
    }

    #[tokio::test]
    async fn test_add_stores_url_as_given() {
        let layer = MemoryLayer::new();
        let state = state_with(layer.clone()).await;
        add_impl(&state, params("  https://a.test  ")).await.unwrap();

        let items = layer.get(Some("https://a.test")).await.unwrap();
        assert_eq!(items["https://a.test"]["scrollTop"], 120);
    }

    #[tokio::test]
    async fn test_add_defaults_title_to_url() {
        let layer = MemoryLayer::new();
        let state = state_with(layer.clone()).await;
        let params = BookmarkAddParams { url: "https://a.test".into(), title: String::new(), scroll_top: 0, favicon: None };
        add_impl(&state, params).await.unwrap();

        let items = layer.get(Some("https://a.test")).await.unwrap();
        assert_eq!(items["https://a.test"]["title"], "https://a.test");
    }

    #[tokio::test]
    async fn test_add_rejects_bad_url() {
        let state = state_with(MemoryLayer::new()).await;
        let err = add_impl(&state, params("javascript:alert(1)")).await.unwrap_err();
        assert_eq!(err.code.0, -32003);
    }

    #[tokio::test]
    async fn test_add_storage_unavailable() {
        let layer = MemoryLayer::new();
        let state = state_with(layer.clone()).await;
        layer.set_available(false);

        let err = add_impl(&state, params("https://a.test")).await.unwrap_err();
        assert_eq!(err.code.0, -32002);
        assert_eq!(state.store().await.count(), 0);
    }
}

//! bookmark_list tool implementation.
//!
//! Re-reads synchronized storage and returns display-ready records,
//! newest first.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use readlater_core::{Error, LinkView, bookmarks::badge_text};

use crate::state::AppState;

/// Parameters for the bookmark_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkListParams {
    /// Return at most this many records.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output from the bookmark_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkListOutput {
    /// Number of stored bookmarks.
    pub total: usize,
    /// Badge text for the count.
    pub badge: String,
    /// Records, most recent first.
    pub links: Vec<LinkView>,
}

/// Implementation of the bookmark_list tool.
pub async fn list_impl(state: &AppState, params: BookmarkListParams) -> Result<CallToolResult, McpError> {
    let links = state.store().await.fetch_all().await?;
    let total = links.len();

    let links: Vec<LinkView> = links
        .iter()
        .take(params.limit.unwrap_or(usize::MAX))
        .map(|bookmark| LinkView::new(bookmark, &state.display))
        .collect();

    state.announce("Finished!", total);

    let output = BookmarkListOutput { total, badge: badge_text(total), links };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{output, state_with};
    use readlater_core::durable::StoredItems;
    use readlater_core::{DurableLayer, MemoryLayer};
    use serde_json::json;

    fn seeded() -> MemoryLayer {
        MemoryLayer::with_items(StoredItems::from([
            (
                "https://old.test".to_string(),
                json!({"url": "https://old.test", "title": "Old", "scrollTop": 10, "timestamp": 100}),
            ),
            (
                "https://new.test".to_string(),
                json!({"url": "https://new.test", "title": "A title that is definitely longer than forty characters", "scrollTop": 0, "timestamp": 300}),
            ),
            ("prefs".to_string(), json!({"theme": "dark"})),
        ]))
    }

    #[tokio::test]
    async fn test_list_orders_and_filters() {
        let state = state_with(seeded()).await;
        let result = list_impl(&state, BookmarkListParams::default()).await.unwrap();
        let out: BookmarkListOutput = output(&result);

        assert_eq!(out.total, 2);
        assert_eq!(out.badge, "2");
        assert_eq!(out.links[0].url, "https://new.test");
        assert_eq!(out.links[0].title, "A title that is definitely longer than f...");
        assert_eq!(out.links[0].favicon, "images/favicon.png");
        assert_eq!(out.links[1].scroll_top, 10);
    }

    #[tokio::test]
    async fn test_list_limit() {
        let state = state_with(seeded()).await;
        let result = list_impl(&state, BookmarkListParams { limit: Some(1) }).await.unwrap();
        let out: BookmarkListOutput = output(&result);
        assert_eq!(out.total, 2);
        assert_eq!(out.links.len(), 1);
    }

    #[tokio::test]
    async fn test_list_picks_up_external_changes() {
        let layer = MemoryLayer::new();
        let state = state_with(layer.clone()).await;
        layer
            .set(StoredItems::from([(
                "https://a.test".to_string(),
                json!({"url": "https://a.test", "title": "A", "timestamp": 1}),
            )]))
            .await
            .unwrap();

        let out: BookmarkListOutput = output(&list_impl(&state, BookmarkListParams::default()).await.unwrap());
        assert_eq!(out.total, 1);
        assert_eq!(state.store().await.count(), 1);
    }

    #[tokio::test]
    async fn test_list_storage_unavailable() {
        let layer = seeded();
        let state = state_with(layer.clone()).await;
        layer.set_available(false);

        let err = list_impl(&state, BookmarkListParams::default()).await.unwrap_err();
        assert_eq!(err.code.0, -32002);
        assert_eq!(state.store().await.count(), 2);
    }
}

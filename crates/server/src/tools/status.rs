//! bookmark_status tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use readlater_core::{Error, bookmarks::badge_text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the bookmark_status tool (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkStatusParams {}

/// Output from the bookmark_status tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkStatusOutput {
    /// Current status line: a recent message or the link summary.
    pub status: String,
    /// Badge text for the cached count.
    pub badge: String,
    /// Cached bookmark count; may lag other clients until the next list.
    pub total: usize,
}

/// Implementation of the bookmark_status tool.
pub async fn status_impl(state: &AppState, _params: BookmarkStatusParams) -> Result<CallToolResult, McpError> {
    let total = state.store().await.count();
    let (status, _) = state.status();

    let output = BookmarkStatusOutput { status, badge: badge_text(total), total };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{output, state_with};
    use crate::tools::bookmarks::{BookmarkAddParams, add_impl};
    use readlater_core::MemoryLayer;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_status_reverts_to_summary() {
        let state = state_with(MemoryLayer::new()).await;
        let params =
            BookmarkAddParams { url: "https://a.test".into(), title: "A".into(), scroll_top: 0, favicon: None };
        add_impl(&state, params).await.unwrap();

        let out: BookmarkStatusOutput = output(&status_impl(&state, BookmarkStatusParams {}).await.unwrap());
        assert_eq!(out.status, "Saved!");
        assert_eq!(out.badge, "1");

        tokio::time::sleep(Duration::from_millis(1_001)).await;
        let out: BookmarkStatusOutput = output(&status_impl(&state, BookmarkStatusParams {}).await.unwrap());
        assert_eq!(out.status, "Total links: 1");
    }
}

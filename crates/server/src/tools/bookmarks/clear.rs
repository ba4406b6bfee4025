//! bookmark_clear tool implementation.
//!
//! Deletes every bookmark. The caller must pass `confirm: true`.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use readlater_core::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::state::AppState;

/// Parameters for the bookmark_clear tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkClearParams {
    /// Must be true; the user has confirmed deleting all links.
    #[serde(default)]
    pub confirm: bool,
}

/// Output from the bookmark_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkClearOutput {
    pub message: String,
    pub total: usize,
}

/// Implementation of the bookmark_clear tool.
pub async fn clear_impl(state: &AppState, params: BookmarkClearParams) -> Result<CallToolResult, McpError> {
    if !params.confirm {
        return Err(ToolError::ConfirmationRequired(
            "Are you sure you want to delete all links? Call again with confirm=true".to_string(),
        )
        .into());
    }

    state.store().await.clear().await?;
    state.announce("Cleared!", 0);

    let output = BookmarkClearOutput { message: "Cleared!".into(), total: 0 };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{output, state_with};
    use readlater_core::MemoryLayer;
    use readlater_core::durable::StoredItems;
    use serde_json::json;

    fn seeded() -> MemoryLayer {
        MemoryLayer::with_items(StoredItems::from([
            ("https://a.test".to_string(), json!({"url": "https://a.test", "title": "A"})),
            ("https://b.test".to_string(), json!({"url": "https://b.test", "title": "B"})),
        ]))
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let layer = seeded();
        let state = state_with(layer.clone()).await;

        let err = clear_impl(&state, BookmarkClearParams { confirm: false }).await.unwrap_err();
        assert_eq!(err.code.0, -32013);
        assert_eq!(layer.len(), 2);
        assert_eq!(state.store().await.count(), 2);
    }

    #[tokio::test]
    async fn test_clear_confirmed() {
        let layer = seeded();
        let state = state_with(layer.clone()).await;

        let out: BookmarkClearOutput = output(&clear_impl(&state, BookmarkClearParams { confirm: true }).await.unwrap());
        assert_eq!(out.total, 0);
        assert!(layer.is_empty());
        assert_eq!(state.store().await.count(), 0);
        assert_eq!(state.status().0, "Cleared!");
    }
}

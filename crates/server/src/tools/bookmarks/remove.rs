//! bookmark_remove tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use readlater_core::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::state::AppState;

/// Parameters for the bookmark_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkRemoveParams {
    /// Storage key of the bookmark (its URL as listed).
    pub key: String,
}

/// Output from the bookmark_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkRemoveOutput {
    pub key: String,
    pub message: String,
    pub total: usize,
}

/// Implementation of the bookmark_remove tool.
///
/// Removing a key that isn't stored succeeds.
pub async fn remove_impl(state: &AppState, params: BookmarkRemoveParams) -> Result<CallToolResult, McpError> {
    if params.key.is_empty() {
        return Err(ToolError::InvalidInput("key cannot be empty".into()).into());
    }

    let total = {
        let mut store = state.store().await;
        store.remove(&params.key).await?;
        store.count()
    };
    state.announce("Removed Link", total);

    let output = BookmarkRemoveOutput { key: params.key, message: "Removed Link".into(), total };
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

    fn one_bookmark() -> MemoryLayer {
        MemoryLayer::with_items(StoredItems::from([(
            "https://a.test".to_string(),
            json!({"url": "https://a.test", "title": "A", "scrollTop": 120, "timestamp": 1000}),
        )]))
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let layer = one_bookmark();
        let state = state_with(layer.clone()).await;

        let params = BookmarkRemoveParams { key: "https://a.test".into() };
        let out: BookmarkRemoveOutput = output(&remove_impl(&state, params).await.unwrap());
        assert_eq!(out.total, 0);
        assert!(layer.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_still_succeeds() {
        let state = state_with(one_bookmark()).await;

        let params = BookmarkRemoveParams { key: "https://missing.test".into() };
        let out: BookmarkRemoveOutput = output(&remove_impl(&state, params).await.unwrap());
        assert_eq!(out.total, 1);
        assert_eq!(out.message, "Removed Link");
    }

    #[tokio::test]
    async fn test_remove_empty_key() {
        let state = state_with(MemoryLayer::new()).await;
        let result = remove_impl(&state, BookmarkRemoveParams { key: String::new() }).await;
        assert!(result.is_err());
    }
}

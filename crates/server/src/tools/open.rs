//! bookmark_open tool implementation.
//!
//! Hands an open request to the coordinator and returns without waiting for
//! the page; scroll restoration is best-effort and reports nothing back.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use readlater_client::page_url;
use readlater_core::{Error, Request};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the bookmark_open tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkOpenParams {
    /// Page address to open.
    pub url: String,

    /// Vertical offset to restore once the page has loaded.
    #[serde(default)]
    pub scroll: u64,
}

/// Output from the bookmark_open tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkOpenOutput {
    /// The request as sent to the coordinator.
    pub request: Request,
}

/// Implementation of the bookmark_open tool.
pub async fn open_impl(state: &AppState, params: BookmarkOpenParams) -> Result<CallToolResult, McpError> {
    page_url(&params.url).map_err(Error::from)?;

    let request = Request::Open { url: params.url, scroll: params.scroll };
    state.opener.send(request.clone()).await?;
    tracing::debug!(?request, "open request queued");

    let output = BookmarkOpenOutput { request };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{output, state_with};
    use readlater_core::MemoryLayer;

    #[tokio::test]
    async fn test_open_queues_request() {
        let state = state_with(MemoryLayer::new()).await;
        let params = BookmarkOpenParams { url: "https://a.test".into(), scroll: 120 };

        let out: BookmarkOpenOutput = output(&open_impl(&state, params).await.unwrap());
        assert_eq!(out.request, Request::Open { url: "https://a.test".into(), scroll: 120 });
    }

    #[tokio::test]
    async fn test_open_rejects_bad_url() {
        let state = state_with(MemoryLayer::new()).await;
        let params = BookmarkOpenParams { url: String::new(), scroll: 0 };
        let err = open_impl(&state, params).await.unwrap_err();
        assert_eq!(err.code.0, -32003);
    }
}

//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::AppState;
use crate::tools::bookmarks::{
    BookmarkAddParams, BookmarkClearParams, BookmarkListParams, BookmarkRemoveParams, add_impl, clear_impl,
    list_impl, remove_impl,
};
use crate::tools::{BookmarkOpenParams, BookmarkStatusParams, open_impl, status_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for readlater.
#[derive(Clone)]
pub struct ReadLaterServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
#[tool_router]
impl ReadLaterServer {
    /// Create a new server handler over shared state.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    #[tool(description = "List saved links, most recent first, with display titles, favicons and scroll offsets.")]
    async fn bookmark_list(&self, params: Parameters<BookmarkListParams>) -> Result<CallToolResult, McpError> {
        list_impl(&self.state, params.0).await
    }

    #[tool(description = "Save a page (url, title, scroll offset) for later reading. Reports 'Link Exists' without \
                          changing anything if the url is already saved.")]
    async fn bookmark_add(&self, params: Parameters<BookmarkAddParams>) -> Result<CallToolResult, McpError> {
        add_impl(&self.state, params.0).await
    }

    #[tool(description = "Remove a saved link by key. Succeeds even if the key is not stored.")]
    async fn bookmark_remove(&self, params: Parameters<BookmarkRemoveParams>) -> Result<CallToolResult, McpError> {
        remove_impl(&self.state, params.0).await
    }

    #[tool(description = "Delete ALL saved links. Irreversible; requires confirm=true after asking the user.")]
    async fn bookmark_clear(&self, params: Parameters<BookmarkClearParams>) -> Result<CallToolResult, McpError> {
        clear_impl(&self.state, params.0).await
    }

    #[tool(description = "Open a saved link in a new page and restore its scroll offset once it loads.")]
    async fn bookmark_open(&self, params: Parameters<BookmarkOpenParams>) -> Result<CallToolResult, McpError> {
        open_impl(&self.state, params.0).await
    }

    #[tool(description = "Current status line and link count badge.")]
    async fn bookmark_status(&self, params: Parameters<BookmarkStatusParams>) -> Result<CallToolResult, McpError> {
        status_impl(&self.state, params.0).await
    }
}

impl ServerHandler for ReadLaterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "readlater".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::state_with;
    use readlater_core::MemoryLayer;

    #[tokio::test]
    async fn test_router_lists_bookmark_tools() {
        let server = ReadLaterServer::new(Arc::new(state_with(MemoryLayer::new()).await));
        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["bookmark_add", "bookmark_clear", "bookmark_list", "bookmark_open", "bookmark_remove", "bookmark_status"]
        );
    }
}

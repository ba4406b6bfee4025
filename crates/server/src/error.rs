//! Structured errors for tool parameter checks.
//!
//! Store and open failures arrive as [`readlater_core::Error`]; these cover
//! what a tool rejects before touching either.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Tool-level input errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid input parameters (e.g., empty key).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A destructive tool was called without explicit confirmation.
    #[error("CONFIRMATION_REQUIRED: {0}")]
    ConfirmationRequired(String),
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let (code, message) = match &err {
            ToolError::InvalidInput(msg) => (-32602, msg.clone()),
            ToolError::ConfirmationRequired(msg) => (-32013, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

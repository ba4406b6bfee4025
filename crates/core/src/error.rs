//! Unified error types for readlater.
//!
//! Every operation that touches durable storage reports failures through
//! [`Error::DurableUnavailable`]. Duplicate adds and removals of absent keys
//! are not errors; see [`crate::bookmarks::AddOutcome`].

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the bookmark store and its surfaces.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL for a bookmark or open request.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// The durable layer could not complete the operation
    /// (backend unreachable, quota exceeded, sync disabled).
    #[error("STORAGE_UNAVAILABLE: {0}")]
    DurableUnavailable(String),

    /// Migration failed to apply.
    #[error("STORAGE_UNAVAILABLE: migration failed: {0}")]
    MigrationFailed(String),

    /// Opening pages is disabled in this configuration.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// The coordinator is gone and can't accept open requests.
    #[error("OPEN_FAILED: {0}")]
    OpenFailed(String),
}

impl Error {
    /// Whether this error must be surfaced to the user as a storage failure.
    pub fn is_durable_unavailable(&self) -> bool {
        matches!(self, Error::DurableUnavailable(_) | Error::MigrationFailed(_))
    }

    /// Shorthand for a quota violation reported by the durable layer.
    pub fn quota_exceeded(detail: impl std::fmt::Display) -> Self {
        Error::DurableUnavailable(format!("quota exceeded: {detail}"))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::DurableUnavailable("connection closed".into()),
            _ => Error::DurableUnavailable("connection closed".into()),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::DurableUnavailable(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::DurableUnavailable(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::DurableUnavailable(msg) => (-32002, msg.clone()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::RenderDisabled => (-32011, "Opening pages is disabled".to_string()),
            Error::OpenFailed(msg) => (-32012, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

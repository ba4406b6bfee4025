//! MCP tool implementations.
//!
//! This module contains all tools exposed by the readlater server.

pub mod bookmarks;
pub mod open;
pub mod status;

pub use open::{BookmarkOpenParams, open_impl};
pub use status::{BookmarkStatusParams, status_impl};

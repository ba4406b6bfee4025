//! Bookmark store tools.
//!
//! These map one-to-one onto the store operations a renderer uses.

pub mod add;
pub mod clear;
pub mod list;
pub mod remove;

pub use add::{BookmarkAddParams, add_impl};
pub use clear::{BookmarkClearParams, clear_impl};
pub use list::{BookmarkListParams, list_impl};
pub use remove::{BookmarkRemoveParams, remove_impl};

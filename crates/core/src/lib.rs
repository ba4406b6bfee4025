//! Core types and shared functionality for readlater.
//!
//! This crate provides:
//! - Durable synchronized key-value layer with SQLite backend
//! - Bookmark store with a read-through cache
//! - Scroll restoration state machine
//! - Unified error types
//! - Configuration structures

pub mod bookmarks;
pub mod config;
pub mod durable;
pub mod error;
pub mod message;
pub mod scroll;
pub mod status;

pub use bookmarks::{AddOutcome, Bookmark, BookmarkStore, LinkView};
pub use config::AppConfig;
pub use durable::{DurableLayer, MemoryLayer, SyncDb};
pub use error::Error;
pub use message::Request;
pub use scroll::{RestorePolicy, RestoreState, ScrollRestorer, ScrollSurface, SurfaceError};
pub use status::StatusLine;

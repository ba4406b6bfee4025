//! Durable, synchronized key-value layer.
//!
//! The bookmark store never talks to SQLite directly; it consumes the
//! [`DurableLayer`] trait, which mirrors a synchronized extension storage
//! area: a flat namespace of string keys mapping to arbitrary JSON values
//! with no enforced schema.
//!
//! Two implementations are provided:
//!
//! - [`SyncDb`]: SQLite-backed, shared by every client pointed at the same
//!   database file (WAL mode), with sync quotas enforced on write
//! - [`MemoryLayer`]: in-process map with failure injection, for tests and
//!   embedding

pub mod connection;
pub mod items;
pub mod memory;
pub mod migrations;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

pub use crate::Error;

pub use connection::SyncDb;
pub use memory::MemoryLayer;

/// Raw entries read from or written to the durable layer, keyed by storage key.
pub type StoredItems = BTreeMap<String, Value>;

/// Storage limits applied by the synchronized backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Maximum serialized size of all entries (key + value), in bytes.
    pub bytes: usize,
    /// Maximum serialized size of a single entry (key + value), in bytes.
    pub bytes_per_item: usize,
    /// Maximum number of entries.
    pub max_items: usize,
}

impl Default for Quota {
    fn default() -> Self {
        Self { bytes: 102_400, bytes_per_item: 8_192, max_items: 512 }
    }
}

impl Quota {
    /// Serialized size of one entry as the quota counts it.
    pub fn entry_size(key: &str, value: &str) -> usize {
        key.len() + value.len()
    }
}

/// Asynchronous key-value backend consumed by the bookmark store.
///
/// All operations may fail with [`Error::DurableUnavailable`].
#[async_trait]
pub trait DurableLayer: Send + Sync {
    /// Read one key, or the whole key space when `key` is `None`.
    ///
    /// A missing key yields an empty map rather than an error.
    async fn get(&self, key: Option<&str>) -> Result<StoredItems, Error>;

    /// Write every entry in `items`, replacing values under existing keys.
    async fn set(&self, items: StoredItems) -> Result<(), Error>;

    /// Delete a single key. Absent keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), Error>;

    /// Delete every key.
    async fn clear(&self) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quota_matches_sync_limits() {
        let quota = Quota::default();
        assert_eq!(quota.bytes, 102_400);
        assert_eq!(quota.bytes_per_item, 8_192);
        assert_eq!(quota.max_items, 512);
    }

    #[test]
    fn test_entry_size() {
        assert_eq!(Quota::entry_size("https://a.test", "{}"), 16);
    }
}

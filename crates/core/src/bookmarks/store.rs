//! Bookmark store with a read-through local cache.
//!
//! The durable layer is the source of truth. The cache is rebuilt wholesale
//! by [`BookmarkStore::fetch_all`] and patched by add/remove so counts stay
//! responsive between fetches. Another client writing to the same durable
//! layer is only reflected after the next fetch.
//!
//! `add` reads then writes without a lock spanning both steps. Two
//! synchronized clients adding the same key at once can both succeed; the
//! later write wins in durable state and the next fetch shows one record.

use std::cmp::Ordering;
use std::sync::Arc;

use super::schema::classify;
use super::{AddOutcome, Bookmark};
use crate::Error;
use crate::durable::{DurableLayer, StoredItems};

/// Synchronized bookmark store.
pub struct BookmarkStore {
    durable: Arc<dyn DurableLayer>,
    links: Vec<Bookmark>,
}

impl std::fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkStore").field("links", &self.links.len()).finish()
    }
}

/// Most recent first; ties broken by key so listings are stable.
fn newest_first(a: &Bookmark, b: &Bookmark) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| a.key.cmp(&b.key))
}

impl BookmarkStore {
    /// Create a store with an empty cache. Call [`Self::fetch_all`] (or use
    /// [`Self::initialize`]) before relying on [`Self::count`].
    pub fn new(durable: Arc<dyn DurableLayer>) -> Self {
        Self { durable, links: Vec::new() }
    }

    /// Create a store and populate its cache from durable state.
    pub async fn initialize(durable: Arc<dyn DurableLayer>) -> Result<Self, Error> {
        let mut store = Self::new(durable);
        store.fetch_all().await?;
        Ok(store)
    }

    /// Number of records in the local cache.
    pub fn count(&self) -> usize {
        self.links.len()
    }

    /// Read every durable entry, keep the ones that classify as bookmarks,
    /// sort newest first and replace the cache.
    ///
    /// On failure the cache is left untouched.
    pub async fn fetch_all(&mut self) -> Result<Vec<Bookmark>, Error> {
        let items = self.durable.get(None).await.inspect_err(|e| {
            tracing::warn!(error = %e, "failed to read bookmarks");
        })?;

        let mut links: Vec<Bookmark> = items
            .iter()
            .filter_map(|(key, value)| match classify(key, value) {
                Ok(bookmark) => Some(bookmark),
                Err(reason) => {
                    tracing::debug!(%key, %reason, "skipping non-bookmark entry");
                    None
                }
            })
            .collect();
        links.sort_by(newest_first);

        tracing::debug!(count = links.len(), skipped = items.len() - links.len(), "fetched bookmarks");

        self.links = links.clone();
        Ok(links)
    }

    /// Persist `bookmark` unless a record already exists for its url.
    ///
    /// The key is always the url; whatever `bookmark.key` held is replaced.
    pub async fn add(&mut self, mut bookmark: Bookmark) -> Result<AddOutcome, Error> {
        if bookmark.url.is_empty() {
            return Err(Error::InvalidInput("bookmark url cannot be empty".into()));
        }
        bookmark.key.clone_from(&bookmark.url);

        let existing = self.durable.get(Some(&bookmark.key)).await?;
        if !existing.is_empty() {
            tracing::debug!(key = %bookmark.key, "bookmark already exists");
            return Ok(AddOutcome::AlreadyExists);
        }

        let value = serde_json::to_value(&bookmark)
            .map_err(|e| Error::InvalidInput(format!("failed to encode bookmark: {e}")))?;
        self.durable
            .set(StoredItems::from([(bookmark.key.clone(), value)]))
            .await
            .inspect_err(|e| tracing::warn!(key = %bookmark.key, error = %e, "failed to save bookmark"))?;

        tracing::debug!(key = %bookmark.key, "bookmark added");
        self.links.push(bookmark);
        Ok(AddOutcome::Added)
    }

    /// Delete the record stored under `key`. Absent keys succeed.
    pub async fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.durable
            .remove(key)
            .await
            .inspect_err(|e| tracing::warn!(%key, error = %e, "failed to remove bookmark"))?;

        let before = self.links.len();
        self.links.retain(|link| link.key != key);
        tracing::debug!(%key, removed = before - self.links.len(), "bookmark removed");
        Ok(())
    }

    /// Delete every durable entry and empty the cache.
    ///
    /// Irreversible; confirmation is the caller's job.
    pub async fn clear(&mut self) -> Result<(), Error> {
        self.durable
            .clear()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to clear bookmarks"))?;
        self.links.clear();
        tracing::info!("bookmarks cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durable::{MemoryLayer, SyncDb};
    use serde_json::json;

    fn bookmark(url: &str, timestamp: i64) -> Bookmark {
        Bookmark::new(url, format!("Title of {url}"), 0).with_timestamp(timestamp)
    }

    fn memory_store() -> (MemoryLayer, BookmarkStore) {
        let layer = MemoryLayer::new();
        let store = BookmarkStore::new(Arc::new(layer.clone()));
        (layer, store)
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (_, mut store) = memory_store();
        let b = bookmark("https://a.test", 1000);

        assert_eq!(store.add(b.clone()).await.unwrap(), AddOutcome::Added);
        assert_eq!(store.add(b).await.unwrap(), AddOutcome::AlreadyExists);
        assert_eq!(store.count(), 1);

        let links = store.fetch_all().await.unwrap();
        assert_eq!(links.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_does_not_overwrite() {
        let (layer, mut store) = memory_store();
        store.add(bookmark("https://a.test", 1000)).await.unwrap();

        let mut changed = bookmark("https://a.test", 2000);
        changed.title = "Changed".into();
        assert_eq!(store.add(changed).await.unwrap(), AddOutcome::AlreadyExists);

        let items = layer.get(Some("https://a.test")).await.unwrap();
        assert_eq!(items["https://a.test"]["timestamp"], 1000);
    }

    #[tokio::test]
    async fn test_fetch_orders_newest_first() {
        let (_, mut store) = memory_store();
        store.add(bookmark("https://one.test", 100)).await.unwrap();
        store.add(bookmark("https://three.test", 300)).await.unwrap();
        store.add(bookmark("https://two.test", 200)).await.unwrap();

        let stamps: Vec<i64> = store.fetch_all().await.unwrap().iter().map(|b| b.timestamp).collect();
        assert_eq!(stamps, vec![300, 200, 100]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_order_by_key() {
        let (_, mut store) = memory_store();
        store.add(bookmark("https://b.test", 5)).await.unwrap();
        store.add(bookmark("https://a.test", 5)).await.unwrap();

        let keys: Vec<String> = store.fetch_all().await.unwrap().into_iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["https://a.test", "https://b.test"]);
    }

    #[tokio::test]
    async fn test_remove_existing_and_absent() {
        let (_, mut store) = memory_store();
        store.add(bookmark("https://a.test", 1)).await.unwrap();
        store.add(bookmark("https://b.test", 2)).await.unwrap();
        assert_eq!(store.count(), 2);

        store.remove("https://a.test").await.unwrap();
        assert_eq!(store.count(), 1);

        store.remove("https://missing.test").await.unwrap();
        assert_eq!(store.count(), 1);

        let links = store.fetch_all().await.unwrap();
        assert!(links.iter().all(|b| b.key != "https://a.test"));
    }

    #[tokio::test]
    async fn test_clear_empties_everything() {
        let (layer, mut store) = memory_store();
        store.add(bookmark("https://a.test", 1)).await.unwrap();
        store.add(bookmark("https://b.test", 2)).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(layer.is_empty());
    }

    #[tokio::test]
    async fn test_foreign_entries_are_filtered() {
        let layer = MemoryLayer::with_items(StoredItems::from([
            ("settings".to_string(), json!({"theme": "dark"})),
            ("counter".to_string(), json!(7)),
            ("https://a.test".to_string(), json!({"url": "https://a.test", "title": "A", "timestamp": 1})),
        ]));
        let store = BookmarkStore::initialize(Arc::new(layer)).await.unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.links[0].key, "https://a.test");
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_cache() {
        let (layer, mut store) = memory_store();
        store.add(bookmark("https://a.test", 1)).await.unwrap();

        layer.set_available(false);
        let err = store.fetch_all().await.unwrap_err();
        assert!(err.is_durable_unavailable());
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_write_failures_leave_cache_unchanged() {
        let (layer, mut store) = memory_store();
        store.add(bookmark("https://a.test", 1)).await.unwrap();
        layer.set_available(false);

        assert!(store.add(bookmark("https://b.test", 2)).await.unwrap_err().is_durable_unavailable());
        assert!(store.remove("https://a.test").await.is_err());
        assert!(store.clear().await.is_err());
        assert_eq!(store.count(), 1);
        assert_eq!(store.links[0].key, "https://a.test");
    }

    #[tokio::test]
    async fn test_add_keys_by_url_whatever_key_was_given() {
        let (layer, mut store) = memory_store();
        let mut stray = bookmark("https://a.test", 1);
        stray.key = "other".into();

        assert_eq!(store.add(stray).await.unwrap(), AddOutcome::Added);
        assert_eq!(store.add(bookmark("https://a.test", 2)).await.unwrap(), AddOutcome::AlreadyExists);

        assert_eq!(layer.len(), 1);
        assert!(layer.get(Some("other")).await.unwrap().is_empty());
        let links = store.fetch_all().await.unwrap();
        assert_eq!(links.iter().filter(|b| b.url == "https://a.test").count(), 1);
        assert_eq!(links[0].key, "https://a.test");
    }

    #[tokio::test]
    async fn test_add_rejects_empty_url() {
        let (_, mut store) = memory_store();
        let err = store.add(Bookmark::new("", "nothing", 0)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_count_lags_other_clients_until_fetch() {
        let layer = MemoryLayer::new();
        let mut here = BookmarkStore::new(Arc::new(layer.clone()));
        let mut there = BookmarkStore::new(Arc::new(layer));

        there.add(bookmark("https://a.test", 1)).await.unwrap();
        assert_eq!(here.count(), 0);

        here.fetch_all().await.unwrap();
        assert_eq!(here.count(), 1);
        assert_eq!(here.add(bookmark("https://a.test", 2)).await.unwrap(), AddOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn test_add_fetch_remove_scenario_over_sqlite() {
        let db = SyncDb::open_in_memory().await.unwrap();
        let mut store = BookmarkStore::initialize(Arc::new(db)).await.unwrap();

        let b = Bookmark::new("https://a.test", "A", 120).with_timestamp(1000);
        assert_eq!(store.add(b).await.unwrap(), AddOutcome::Added);

        let links = store.fetch_all().await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://a.test");
        assert_eq!(links[0].title, "A");
        assert_eq!(links[0].scroll_top, 120);
        assert_eq!(links[0].timestamp, 1000);

        store.remove("https://a.test").await.unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quota_failure_surfaces_from_sqlite() {
        let quota = crate::durable::Quota { max_items: 1, ..Default::default() };
        let db = SyncDb::open_in_memory_with_quota(quota).await.unwrap();
        let mut store = BookmarkStore::new(Arc::new(db));

        store.add(bookmark("https://a.test", 1)).await.unwrap();
        let err = store.add(bookmark("https://b.test", 2)).await.unwrap_err();
        assert!(err.is_durable_unavailable());
        assert_eq!(store.count(), 1);
    }
}

//! In-process durable layer.
//!
//! Behaves like [`super::SyncDb`] without a database file. Clones share the
//! same map, so two stores built from clones act like two synchronized
//! clients. Availability can be toggled to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{DurableLayer, StoredItems};
use crate::Error;

#[derive(Debug, Default)]
struct Shared {
    items: Mutex<StoredItems>,
    unavailable: AtomicBool,
}

/// Map-backed [`DurableLayer`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLayer {
    shared: Arc<Shared>,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given raw entries.
    pub fn with_items(items: StoredItems) -> Self {
        let layer = Self::new();
        *layer.shared.items.lock().unwrap_or_else(|p| p.into_inner()) = items;
        layer
    }

    /// Make every subsequent operation fail with [`Error::DurableUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.shared.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Number of raw entries, bookmark or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), Error> {
        if self.shared.unavailable.load(Ordering::SeqCst) {
            return Err(Error::DurableUnavailable("sync storage is disabled".into()));
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, StoredItems> {
        self.shared.items.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl DurableLayer for MemoryLayer {
    async fn get(&self, key: Option<&str>) -> Result<StoredItems, Error> {
        self.check()?;
        let items = self.lock();
        Ok(match key {
            Some(key) => items.get_key_value(key).map(|(k, v)| (k.clone(), v.clone())).into_iter().collect(),
            None => items.clone(),
        })
    }

    async fn set(&self, items: StoredItems) -> Result<(), Error> {
        self.check()?;
        self.lock().extend(items);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.check()?;
        self.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.check()?;
        self.lock().clear();
        Ok(())
    }
}

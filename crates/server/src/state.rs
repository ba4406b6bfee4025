//! Shared state behind the tool handlers.

use std::sync::{Arc, Mutex};

use readlater_client::OpenSender;
use readlater_core::bookmarks::DisplayOptions;
use readlater_core::{AppConfig, BookmarkStore, DurableLayer, Error, StatusLine};
use tokio::sync::MutexGuard;

/// The UI context: owns the store cache and the status line.
pub struct AppState {
    store: tokio::sync::Mutex<BookmarkStore>,
    status: Mutex<StatusLine>,
    pub display: DisplayOptions,
    pub opener: OpenSender,
}

impl AppState {
    /// Load bookmarks from `durable` and report the initial count.
    pub async fn initialize(
        durable: Arc<dyn DurableLayer>, config: &AppConfig, opener: OpenSender,
    ) -> Result<Self, Error> {
        let mut status = StatusLine::new(config.message_revert());
        status.message("Loading");

        let store = BookmarkStore::initialize(durable).await?;
        status.set_total(store.count());
        status.message("Finished!");
        tracing::info!(count = store.count(), "bookmarks loaded");

        Ok(Self { store: tokio::sync::Mutex::new(store), status: Mutex::new(status), display: config.display(), opener })
    }

    pub async fn store(&self) -> MutexGuard<'_, BookmarkStore> {
        self.store.lock().await
    }

    /// Show a transient status message, with the summary reverting to `total`.
    pub fn announce(&self, text: &str, total: usize) {
        let mut status = self.status.lock().unwrap_or_else(|p| p.into_inner());
        status.set_total(total);
        status.message(text);
    }

    /// Current status text and the total it summarizes.
    pub fn status(&self) -> (String, usize) {
        let status = self.status.lock().unwrap_or_else(|p| p.into_inner());
        (status.current(), status.total())
    }
}

//! Transient status line for UI collaborators.
//!
//! [`StatusLine::message`] shows text immediately and schedules a revert to
//! the `Total links: N` summary. A newer message cancels the pending revert.
//! The summary reads the total at revert time, so counts updated in between
//! are reflected.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::bookmarks::summary_text;

/// Status text with an auto-reverting message slot.
#[derive(Debug)]
pub struct StatusLine {
    text: Arc<watch::Sender<String>>,
    total: Arc<AtomicUsize>,
    revert_after: Duration,
    pending: Option<JoinHandle<()>>,
}

impl StatusLine {
    pub fn new(revert_after: Duration) -> Self {
        let (tx, _) = watch::channel(summary_text(0));
        Self { text: Arc::new(tx), total: Arc::new(AtomicUsize::new(0)), revert_after, pending: None }
    }

    /// Current text.
    pub fn current(&self) -> String {
        self.text.borrow().clone()
    }

    /// Update the count the summary reports.
    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Show `text` now and revert to the summary after the configured delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn message(&mut self, text: impl Into<String>) {
        self.cancel();
        self.text.send_replace(text.into());

        let sender = Arc::clone(&self.text);
        let total = Arc::clone(&self.total);
        let delay = self.revert_after;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sender.send_replace(summary_text(total.load(Ordering::Relaxed)));
        }));
    }

    /// Drop any pending revert, leaving the current text in place.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_message_reverts_to_summary() {
        let mut status = StatusLine::new(Duration::from_secs(1));
        status.set_total(2);
        status.message("Saved!");
        assert_eq!(status.current(), "Saved!");

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(status.current(), "Saved!");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(status.current(), "Total links: 2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_cancels_revert() {
        let mut status = StatusLine::new(Duration::from_secs(1));
        status.message("Loading");
        tokio::time::sleep(Duration::from_millis(600)).await;
        status.message("Finished!");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(status.current(), "Finished!");

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(status.current(), "Total links: 0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_uses_total_at_revert_time() {
        let mut status = StatusLine::new(Duration::from_secs(1));
        status.set_total(1);
        status.message("Removed Link");
        status.set_total(0);

        tokio::time::sleep(Duration::from_millis(1_001)).await;
        assert_eq!(status.current(), "Total links: 0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_message() {
        let mut status = StatusLine::new(Duration::from_secs(1));
        status.message("Cleared!");
        status.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(status.current(), "Cleared!");
    }
}

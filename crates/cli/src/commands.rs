//! Command implementations.
//!
//! Each command works on an already-initialized store and returns the text
//! to print, so `main` stays a thin dispatcher.

use anyhow::{Result, bail};
use readlater_client::{Coordinator, PageOpener, page_url};
use readlater_core::bookmarks::{DisplayOptions, badge_text, summary_text};
use readlater_core::{Bookmark, BookmarkStore, LinkView, Request, RestoreState};

/// Newest-first listing with truncated titles.
pub async fn list(store: &mut BookmarkStore, display: &DisplayOptions, limit: Option<usize>) -> Result<String> {
    let links = store.fetch_all().await?;
    let total = links.len();

    let mut out = format!("{} [{}]\n", summary_text(total), badge_text(total));
    for link in links.iter().take(limit.unwrap_or(usize::MAX)) {
        let view = LinkView::new(link, display);
        out.push_str(&format!("{}  {}  (scroll {})\n", view.title, view.url, view.scroll_top));
    }
    Ok(out)
}

/// Save a page unless it is already saved.
pub async fn add(
    store: &mut BookmarkStore, url: &str, title: Option<String>, scroll_top: u64, favicon: Option<String>,
) -> Result<String> {
    page_url(url)?;

    let url = url.trim();
    let title = title.filter(|t| !t.is_empty()).unwrap_or_else(|| url.to_string());
    let mut bookmark = Bookmark::new(url, title, scroll_top);
    if let Some(favicon) = favicon.filter(|f| !f.is_empty()) {
        bookmark = bookmark.with_favicon(favicon);
    }

    let outcome = store.add(bookmark).await?;
    Ok(format!("{} {}", outcome.message(), summary_text(store.count())))
}

pub async fn remove(store: &mut BookmarkStore, key: &str) -> Result<String> {
    if key.is_empty() {
        bail!("key must not be empty");
    }
    store.remove(key).await?;
    Ok(format!("Removed Link. {}", summary_text(store.count())))
}

/// Delete everything. Refuses unless `yes` is set.
pub async fn clear(store: &mut BookmarkStore, yes: bool) -> Result<String> {
    if !yes {
        bail!("refusing to delete all links without --yes");
    }
    store.clear().await?;
    Ok("Cleared!".to_string())
}

/// Open a page and wait for scroll restoration to finish.
pub async fn open(coordinator: &Coordinator, url: &str, scroll: u64) -> Result<String> {
    let state = coordinator.handle(Request::Open { url: url.to_string(), scroll }).await?;
    Ok(match state {
        RestoreState::Settled { attempts } => format!("Restored scroll {scroll} after {attempts} attempt(s)"),
        RestoreState::Exhausted { attempts } => format!("Gave up restoring scroll {scroll} after {attempts} attempts"),
        RestoreState::Attempting { attempt } => format!("Restoring scroll {scroll} (attempt {attempt})"),
    })
}

/// Block until the opened pages are closed or the user interrupts.
pub async fn wait_for_close(opener: &dyn PageOpener) {
    tokio::select! {
        () = opener.closed() => tracing::debug!("pages closed"),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "failed to listen for interrupt");
            }
        }
    }
}

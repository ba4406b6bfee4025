//! Chromium pages via chromiumoxide.
//!
//! By default the browser runs with a visible window so opened links land in
//! front of the user and stay open after the scroll is restored. Headless
//! mode is for tests and automation; its tabs are closed once restoration
//! ends.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use readlater_core::{ScrollSurface, SurfaceError};
use tokio::sync::watch;
use url::Url;

use super::{OpenError, PageOpener};

/// Reads the document's vertical offset across quirks and standards modes.
const READ_SCROLL_TOP: &str =
    "window.scrollY || document.documentElement.scrollTop || (document.body ? document.body.scrollTop : 0) || 0";

/// Opens each request in a new tab of one Chromium instance.
pub struct BrowserOpener {
    browser: Browser,
    timeout: Duration,
    headless: bool,
    closed: watch::Receiver<bool>,
}

impl BrowserOpener {
    /// Launch Chromium, with a window unless `headless` is set.
    ///
    /// A background task drains Chrome DevTools Protocol events until the
    /// browser goes away.
    pub async fn launch(timeout: Duration, headless: bool) -> Result<Self, OpenError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let (browser, mut handler) = Browser::launch(builder.build().map_err(OpenError::BrowserLaunch)?)
            .await
            .map_err(|e| OpenError::BrowserLaunch(e.to_string()))?;

        let (closed_tx, closed) = watch::channel(false);
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                }
            }
            tracing::info!("browser closed");
            closed_tx.send_replace(true);
        });

        tracing::info!(headless, "launched browser");
        Ok(Self { browser, timeout, headless, closed })
    }
}

#[async_trait]
impl PageOpener for BrowserOpener {
    async fn open(&self, url: &Url) -> Result<Box<dyn ScrollSurface>, OpenError> {
        let page = tokio::time::timeout(self.timeout, self.browser.new_page(url.as_str()))
            .await
            .map_err(|_| OpenError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(|e| OpenError::Navigation(e.to_string()))?;

        tracing::debug!(%url, "opened page");
        Ok(Box::new(PageSurface { page, close_on_drop: self.headless }))
    }

    async fn closed(&self) {
        if self.headless {
            return;
        }
        let mut closed = self.closed.clone();
        if closed.wait_for(|closed| *closed).await.is_err() {
            tracing::debug!("browser handler dropped");
        }
    }
}

/// A browser tab seen as a scroll surface.
pub struct PageSurface {
    page: Page,
    close_on_drop: bool,
}

#[async_trait]
impl ScrollSurface for PageSurface {
    async fn set_scroll_top(&self, offset: u64) -> Result<(), SurfaceError> {
        self.page
            .evaluate(format!("window.scrollTo(0, {offset})"))
            .await
            .map_err(|e| SurfaceError(e.to_string()))?;
        Ok(())
    }

    async fn scroll_top(&self) -> Result<u64, SurfaceError> {
        let offset: f64 = self
            .page
            .evaluate(READ_SCROLL_TOP)
            .await
            .map_err(|e| SurfaceError(e.to_string()))?
            .into_value()
            .map_err(|e| SurfaceError(e.to_string()))?;
        Ok(reported_offset(offset))
    }
}

impl Drop for PageSurface {
    fn drop(&mut self) {
        if !self.close_on_drop {
            return;
        }
        let page = self.page.clone();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                if let Err(e) = page.close().await {
                    tracing::debug!(error = %e, "failed to close page");
                }
            });
        }
    }
}

/// Nearest whole pixel; fractional device pixel ratios report offsets like
/// `1199.6` for a requested `1200`.
fn reported_offset(offset: f64) -> u64 {
    if offset.is_finite() && offset > 0.0 { offset.round() as u64 } else { 0 }
}

//! Page openers: create a viewing context for a URL.
//!
//! The coordinator asks a [`PageOpener`] for a fresh page and then runs the
//! scroll restorer against it. The Chromium opener lives behind the `render`
//! feature; [`DisabledOpener`] is used when opening is turned off.

#[cfg(feature = "render")]
pub mod browser;

use std::sync::Arc;

use async_trait::async_trait;
use readlater_core::ScrollSurface;
use thiserror::Error;
use url::Url;

#[cfg(feature = "render")]
pub use browser::BrowserOpener;

/// Errors that can occur while opening a page.
#[derive(Debug, Error)]
pub enum OpenError {
    /// Opening pages is turned off.
    #[error("page opening is disabled")]
    Disabled,

    /// The request named something that isn't an openable page.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] crate::url::UrlError),

    /// Failed to launch or connect to the browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to the URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Timed out waiting for the page.
    #[error("page open timeout after {0}ms")]
    Timeout(u64),
}

impl From<OpenError> for readlater_core::Error {
    fn from(err: OpenError) -> Self {
        match err {
            OpenError::Disabled => readlater_core::Error::RenderDisabled,
            OpenError::InvalidUrl(e) => e.into(),
            other => readlater_core::Error::OpenFailed(other.to_string()),
        }
    }
}

/// Creates new viewing contexts.
#[async_trait]
pub trait PageOpener: Send + Sync {
    /// Open `url` in a new page and return a handle to scroll it.
    async fn open(&self, url: &Url) -> Result<Box<dyn ScrollSurface>, OpenError>;

    /// Resolve once the pages this opener showed are gone. Openers that
    /// leave nothing on screen resolve immediately.
    async fn closed(&self) {}
}

/// Opener used when page opening is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOpener;

#[async_trait]
impl PageOpener for DisabledOpener {
    async fn open(&self, url: &Url) -> Result<Box<dyn ScrollSurface>, OpenError> {
        tracing::debug!(%url, "open requested while disabled");
        Err(OpenError::Disabled)
    }
}

/// Pick an opener for `config`.
///
/// Falls back to [`DisabledOpener`] when rendering is off, compiled out, or
/// the browser fails to launch.
pub async fn from_config(config: &readlater_core::AppConfig) -> Arc<dyn PageOpener> {
    #[cfg(feature = "render")]
    if config.render_enabled {
        match BrowserOpener::launch(config.render_timeout(), config.render_headless).await {
            Ok(opener) => return Arc::new(opener),
            Err(e) => tracing::warn!(error = %e, "browser unavailable; opening disabled"),
        }
    }

    #[cfg(not(feature = "render"))]
    if config.render_enabled {
        tracing::warn!("built without the render feature; opening disabled");
    }

    Arc::new(DisabledOpener)
}

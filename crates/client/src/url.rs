//! URL validation for bookmarks and open requests.
//!
//! Bookmark keys are the URL exactly as saved, so validation never rewrites
//! the stored string. [`page_url`] only decides whether a string names a
//! page that can be opened, and returns the parsed form for navigation.

/// Error type for URL validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a page address.
///
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Accept only `http`, `https` and `file`
///
/// Fragments and query strings are kept; a saved anchor is part of the page.
pub fn page_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains(':') { trimmed.to_string() } else { format!("https://{trimmed}") };

    let parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" | "file" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

impl From<UrlError> for readlater_core::Error {
    fn from(err: UrlError) -> Self {
        readlater_core::Error::InvalidUrl(err.to_string())
    }
}

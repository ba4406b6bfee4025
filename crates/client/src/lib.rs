//! Client code for readlater.
//!
//! This crate provides the page-opening side shared by the server and CLI:
//! URL validation, page openers, and the coordinator that turns open
//! requests into restored pages.

pub mod coordinator;
pub mod opener;
pub mod url;

pub use coordinator::{Coordinator, OpenSender};
#[cfg(feature = "render")]
pub use opener::BrowserOpener;
pub use opener::{DisabledOpener, OpenError, PageOpener, from_config};
pub use url::{UrlError, page_url};

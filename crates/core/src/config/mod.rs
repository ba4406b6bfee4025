//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (READLATER_*)
//! 2. TOML config file (if READLATER_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::bookmarks::DisplayOptions;
use crate::durable::Quota;
use crate::scroll::RestorePolicy;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (READLATER_*)
/// 2. TOML config file (if READLATER_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the synchronized SQLite database.
    ///
    /// Set via READLATER_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Total storage quota in bytes.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,

    /// Per-item storage quota in bytes.
    #[serde(default = "default_quota_bytes_per_item")]
    pub quota_bytes_per_item: usize,

    /// Maximum number of stored items.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Delay unit between scroll attempts, in milliseconds.
    ///
    /// Set via READLATER_SCROLL_BASE_DELAY_MS environment variable.
    #[serde(default = "default_scroll_base_delay_ms")]
    pub scroll_base_delay_ms: u64,

    /// Total scroll attempts, including the first.
    #[serde(default = "default_scroll_max_attempts")]
    pub scroll_max_attempts: u32,

    /// How long a status message stays before reverting to the summary.
    #[serde(default = "default_message_revert_ms")]
    pub message_revert_ms: u64,

    /// Title length shown in listings before truncation.
    #[serde(default = "default_title_display_chars")]
    pub title_display_chars: usize,

    /// Icon shown for bookmarks without a favicon.
    #[serde(default = "default_favicon")]
    pub default_favicon: String,

    /// Whether bookmarks may be opened in a browser.
    ///
    /// Set via READLATER_RENDER_ENABLED environment variable.
    #[serde(default)]
    pub render_enabled: bool,

    /// Run the browser without a window. Opened tabs are closed once the
    /// scroll is restored, so this only suits tests and automation.
    #[serde(default)]
    pub render_headless: bool,

    /// Page load timeout when opening a bookmark, in milliseconds.
    #[serde(default = "default_render_timeout_ms")]
    pub render_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./readlater-sync.sqlite")
}

fn default_quota_bytes() -> usize {
    102_400
}

fn default_quota_bytes_per_item() -> usize {
    8_192
}

fn default_max_items() -> usize {
    512
}

fn default_scroll_base_delay_ms() -> u64 {
    250
}

fn default_scroll_max_attempts() -> u32 {
    6
}

fn default_message_revert_ms() -> u64 {
    1_000
}

fn default_title_display_chars() -> usize {
    40
}

fn default_favicon() -> String {
    "images/favicon.png".into()
}

fn default_render_timeout_ms() -> u64 {
    30_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            quota_bytes: default_quota_bytes(),
            quota_bytes_per_item: default_quota_bytes_per_item(),
            max_items: default_max_items(),
            scroll_base_delay_ms: default_scroll_base_delay_ms(),
            scroll_max_attempts: default_scroll_max_attempts(),
            message_revert_ms: default_message_revert_ms(),
            title_display_chars: default_title_display_chars(),
            default_favicon: default_favicon(),
            render_enabled: false,
            render_headless: false,
            render_timeout_ms: default_render_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::var("READLATER_CONFIG_FILE").ok().map(PathBuf::from))
    }

    /// Load with an explicit config file instead of READLATER_CONFIG_FILE.
    pub fn load_from(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_path) = config_file {
            figment = figment.merge(Toml::file(config_path));
        }

        figment = figment.merge(
            Env::prefixed("READLATER_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Storage limits for the durable layer.
    pub fn quota(&self) -> Quota {
        Quota { bytes: self.quota_bytes, bytes_per_item: self.quota_bytes_per_item, max_items: self.max_items }
    }

    /// Retry policy for scroll restoration.
    pub fn restore_policy(&self) -> RestorePolicy {
        RestorePolicy {
            max_attempts: self.scroll_max_attempts,
            base_delay: Duration::from_millis(self.scroll_base_delay_ms),
        }
    }

    /// Listing options for renderers.
    pub fn display(&self) -> DisplayOptions {
        DisplayOptions { title_chars: self.title_display_chars, default_favicon: self.default_favicon.clone() }
    }

    /// Status message lifetime.
    pub fn message_revert(&self) -> Duration {
        Duration::from_millis(self.message_revert_ms)
    }

    /// Page load timeout as Duration.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

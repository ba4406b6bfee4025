//! Configuration validation rules.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - any quota is 0, or the per-item quota exceeds the total quota
    /// - `scroll_max_attempts` is 0 or above 20
    /// - `scroll_base_delay_ms` exceeds 10 seconds
    /// - `message_revert_ms` is 0
    /// - `title_display_chars` is 0
    /// - `render_timeout_ms` is below 100ms or above 5 minutes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quota_bytes == 0 {
            return Err(invalid("quota_bytes", "must be greater than 0"));
        }
        if self.quota_bytes_per_item == 0 {
            return Err(invalid("quota_bytes_per_item", "must be greater than 0"));
        }
        if self.quota_bytes_per_item > self.quota_bytes {
            return Err(invalid("quota_bytes_per_item", "must not exceed quota_bytes"));
        }
        if self.max_items == 0 {
            return Err(invalid("max_items", "must be greater than 0"));
        }

        if self.scroll_max_attempts == 0 {
            return Err(invalid("scroll_max_attempts", "must be at least 1"));
        }
        if self.scroll_max_attempts > 20 {
            return Err(invalid("scroll_max_attempts", "must not exceed 20"));
        }
        if self.scroll_base_delay_ms > 10_000 {
            return Err(invalid("scroll_base_delay_ms", "must not exceed 10 seconds (10000ms)"));
        }

        if self.message_revert_ms == 0 {
            return Err(invalid("message_revert_ms", "must be greater than 0"));
        }
        if self.title_display_chars == 0 {
            return Err(invalid("title_display_chars", "must be greater than 0"));
        }

        if self.render_timeout_ms < 100 {
            return Err(invalid("render_timeout_ms", "must be at least 100ms"));
        }
        if self.render_timeout_ms > 300_000 {
            return Err(invalid("render_timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.default_favicon.is_empty() {
            tracing::warn!("default_favicon is empty; bookmarks without an icon will render none");
        }

        Ok(())
    }
}

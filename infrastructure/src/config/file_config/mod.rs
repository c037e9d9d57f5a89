//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod api;
mod notifications;
mod storage;

pub use api::FileApiConfig;
pub use notifications::FileNotificationsConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    UnsupportedScheme(String),

    #[error("notifications.duration_ms cannot be 0")]
    ZeroDuration,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend API settings
    pub api: FileApiConfig,
    /// Durable client state
    pub storage: FileStorageConfig,
    /// Notification display settings
    pub notifications: FileNotificationsConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        if let Err(e) = self.api.validate() {
            issues.push(e);
        }
        if self.notifications.duration_ms == 0 {
            issues.push(ConfigValidationError::ZeroDuration);
        }
        issues
    }
}

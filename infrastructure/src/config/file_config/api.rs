//! API configuration from TOML (`[api]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Raw API configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Backend base URL, without the `/api/v1` prefix
    pub base_url: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FileApiConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigValidationError::UnsupportedScheme(url.to_string()));
        }
        Ok(())
    }
}

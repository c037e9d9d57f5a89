//! Configuration file loading for llmdesk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `LLMDESK_API_URL`
//! 2. `--config <path>` specified file
//! 3. Project root: `./llmdesk.toml` or `./.llmdesk.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llmdesk/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileNotificationsConfig, FileStorageConfig,
};
pub use loader::{API_URL_ENV, ConfigLoader};

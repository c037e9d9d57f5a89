//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// State file path; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Resolve the state file location.
    ///
    /// `<data_dir>/llmdesk/state.json`, or `./.llmdesk/state.json` when the
    /// platform has no data directory.
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("llmdesk"))
            .unwrap_or_else(|| PathBuf::from(".llmdesk"))
            .join("state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let toml_str = r#"
[storage]
path = "/tmp/llmdesk-test.json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.storage.resolve_path(),
            PathBuf::from("/tmp/llmdesk-test.json")
        );
    }

    #[test]
    fn test_default_path() {
        let path = FileStorageConfig::default().resolve_path();
        assert!(path.ends_with("llmdesk/state.json") || path.ends_with(".llmdesk/state.json"));
    }
}

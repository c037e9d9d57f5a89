//! Notification configuration from TOML (`[notifications]` section)

use llmdesk_application::BehaviorConfig;
use serde::{Deserialize, Serialize};

/// Raw notification configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationsConfig {
    /// How long error notifications stay visible
    pub duration_ms: u64,
}

impl Default for FileNotificationsConfig {
    fn default() -> Self {
        Self { duration_ms: 5000 }
    }
}

impl FileNotificationsConfig {
    pub fn to_behavior(&self) -> BehaviorConfig {
        BehaviorConfig::with_notification_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_notifications_deserialize() {
        let toml_str = r#"
[notifications]
duration_ms = 1500
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.notifications.to_behavior().notification_duration,
            Duration::from_millis(1500)
        );
    }
}

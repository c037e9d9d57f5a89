//! Application-level configuration.
//!
//! Runtime knobs that shape how the stores and gateway report to the user.

use llmdesk_domain::notification::DEFAULT_DURATION;
use std::time::Duration;

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// How long gateway-emitted notifications stay visible.
    pub notification_duration: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            notification_duration: DEFAULT_DURATION,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with the notification duration in milliseconds.
    pub fn with_notification_millis(millis: u64) -> Self {
        Self {
            notification_duration: Duration::from_millis(millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration() {
        assert_eq!(
            BehaviorConfig::default().notification_duration,
            Duration::from_millis(5000)
        );
        assert_eq!(
            BehaviorConfig::with_notification_millis(250).notification_duration,
            Duration::from_millis(250)
        );
    }
}

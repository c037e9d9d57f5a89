//! UI store
//!
//! Wraps the UI slice, persists the theme preference and collects
//! notifications for whatever renders them.

use crate::ports::key_value_store::KeyValueStore;
use crate::ports::notifier::NotificationSink;
use crate::stores::slice::Store;
use llmdesk_domain::core::keys;
use llmdesk_domain::{Notification, NotificationId, Theme, UiAction, UiState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

pub struct UiStore {
    store: Store<UiState>,
    storage: Arc<dyn KeyValueStore>,
}

impl UiStore {
    /// Create the store with the persisted theme (light when absent or invalid)
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let theme = match storage.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!("Ignoring persisted theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Could not read persisted theme: {}", e);
                Theme::default()
            }
        };
        Self {
            store: Store::new(UiState::with_theme(theme)),
            storage,
        }
    }

    pub fn dispatch(&self, action: UiAction) {
        let persist_theme = matches!(action, UiAction::ToggleTheme | UiAction::SetTheme(_));
        self.store.dispatch(action);
        if persist_theme {
            let theme = self.theme();
            if let Err(e) = self.storage.set(keys::THEME, theme.as_str()) {
                warn!("Could not persist theme: {}", e);
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.store.select(|s| s.theme)
    }

    /// Notifications currently on screen, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.store.select(|s| s.notifications.clone())
    }

    pub fn dismiss(&self, id: NotificationId) {
        self.dispatch(UiAction::RemoveNotification(id));
    }

    /// Remove and return every live notification
    pub fn drain_notifications(&self) -> Vec<Notification> {
        let live = self.notifications();
        for n in &live {
            self.dismiss(n.id);
        }
        live
    }

    pub fn snapshot(&self) -> UiState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.store.subscribe()
    }
}

impl NotificationSink for UiStore {
    fn notify(&self, notification: Notification) {
        self.dispatch(UiAction::AddNotification(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::key_value_store::StorageError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStorage {
        values: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MockStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_theme_loaded_from_storage() {
        let storage = Arc::new(MockStorage::default());
        storage.set(keys::THEME, "dark").unwrap();
        assert_eq!(UiStore::new(storage).theme(), Theme::Dark);
    }

    #[test]
    fn test_invalid_persisted_theme_falls_back() {
        let storage = Arc::new(MockStorage::default());
        storage.set(keys::THEME, "sepia").unwrap();
        assert_eq!(UiStore::new(storage).theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let storage = Arc::new(MockStorage::default());
        let ui = UiStore::new(storage.clone());
        ui.dispatch(UiAction::ToggleTheme);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_sidebar_does_not_touch_storage() {
        let storage = Arc::new(MockStorage::default());
        let ui = UiStore::new(storage.clone());
        ui.dispatch(UiAction::ToggleSidebar);
        assert!(storage.get(keys::THEME).unwrap().is_none());
    }

    #[test]
    fn test_notify_and_drain() {
        let ui = UiStore::new(Arc::new(MockStorage::default()));
        ui.notify(Notification::error("first"));
        ui.notify(Notification::info("second"));

        let drained = ui.drain_notifications();
        assert_eq!(
            drained.iter().map(|n| n.message.as_str()).collect::<Vec<_>>(),
            vec!["first", "second"]
        );
        assert!(ui.notifications().is_empty());
    }
}

//! Root client state: one store per slice.

use crate::ports::key_value_store::KeyValueStore;
use crate::stores::session::SessionStore;
use crate::stores::slice::Store;
use crate::stores::ui::UiStore;
use chrono::Utc;
use llmdesk_domain::{ChatState, DashboardState, EvaluationState, LlmAction, LlmState};
use std::sync::Arc;

/// Every client-side state slice, each behind its own single-writer store.
///
/// `session` and `ui` are shared with the gateway (credential ports and
/// notification sink) and so live behind `Arc`.
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub ui: Arc<UiStore>,
    pub llm: Store<LlmState>,
    pub chat: Store<ChatState>,
    pub dashboard: Store<DashboardState>,
    pub evaluation: Store<EvaluationState>,
}

impl AppState {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: Arc::new(SessionStore::new(Arc::clone(&storage))),
            ui: Arc::new(UiStore::new(storage)),
            llm: Store::default(),
            chat: Store::default(),
            dashboard: Store::new(DashboardState::new(Utc::now())),
            evaluation: Store::default(),
        }
    }

    /// Mirror the signed-in user's API-key presence onto the provider list
    pub fn sync_provider_keys(&self) {
        let user = self.session.select(|s| s.user().cloned());
        self.llm.dispatch(LlmAction::SyncApiKeys(user));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::key_value_store::StorageError;
    use llmdesk_domain::{
        ApiKeys, AuthResponse, DashboardAction, EvaluationAction, ProviderId, SessionEvent,
        TransitionKind, User,
    };

    struct EmptyStorage;

    impl KeyValueStore for EmptyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_sync_provider_keys_follows_session() {
        let app = AppState::new(Arc::new(EmptyStorage));
        let mut keys = ApiKeys::default();
        keys.set(ProviderId::Google, "g-key");
        app.session.apply(SessionEvent::Authenticated {
            via: TransitionKind::Login,
            response: AuthResponse {
                token: "t1".to_string(),
                user: User::new("1", "a@b.com", "A").with_api_keys(keys),
            },
        });

        app.sync_provider_keys();
        assert!(app.llm.select(|s| s.provider(ProviderId::Google).unwrap().api_key_configured));

        app.session.apply(SessionEvent::LoggedOut);
        app.sync_provider_keys();
        assert!(!app.llm.select(|s| s.provider(ProviderId::Google).unwrap().api_key_configured));
    }

    #[test]
    fn test_slices_start_empty() {
        let app = AppState::new(Arc::new(EmptyStorage));
        app.dashboard.dispatch(DashboardAction::SetLoading(true));
        app.evaluation
            .dispatch(EvaluationAction::SetError(Some("x".to_string())));
        assert!(app.dashboard.select(|s| s.is_loading && s.usage_stats.is_empty()));
        assert!(app.chat.select(|s| s.messages.is_empty()));
        assert_eq!(app.evaluation.snapshot().error.as_deref(), Some("x"));
    }
}

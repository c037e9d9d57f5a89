//! Session store
//!
//! Owns the [`SessionState`], runs the reducer's side effects against the
//! durable store, and serves the gateway through the credential ports.

use crate::ports::credentials::{CredentialProvider, SessionInvalidator};
use crate::ports::key_value_store::KeyValueStore;
use llmdesk_domain::core::keys;
use llmdesk_domain::{SessionEffect, SessionEvent, SessionState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Create the store, seeding the token from durable storage.
    ///
    /// An unreadable store is treated as empty.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let persisted = match storage.get(keys::TOKEN) {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read persisted token: {}", e);
                None
            }
        };
        debug!(has_token = persisted.is_some(), "Session store initialized");

        let (state, _) = watch::channel(SessionState::new(persisted));
        Self { state, storage }
    }

    /// Apply one event and execute its effects.
    pub fn apply(&self, event: SessionEvent) {
        self.state.send_modify(|state| {
            let effects = state.apply(event);
            // Effects run under the state lock so storage writes land in
            // the same order as the state changes that caused them.
            self.execute(effects);
        });
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn select<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn execute(&self, effects: Vec<SessionEffect>) {
        for effect in effects {
            let result = match &effect {
                SessionEffect::PersistToken(token) => self.storage.set(keys::TOKEN, token),
                SessionEffect::ClearPersistedToken => self.storage.remove(keys::TOKEN),
            };
            if let Err(e) = result {
                warn!("Failed to {}: {}", effect_name(&effect), e);
            }
        }
    }
}

fn effect_name(effect: &SessionEffect) -> &'static str {
    match effect {
        SessionEffect::PersistToken(_) => "persist token",
        SessionEffect::ClearPersistedToken => "clear token",
    }
}

impl CredentialProvider for SessionStore {
    fn current_token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_owned)
    }
}

impl SessionInvalidator for SessionStore {
    fn invalidate(&self, rejected_token: &str) -> bool {
        let ended = self.state.send_if_modified(|state| {
            if !state.holds_token(rejected_token) {
                return false;
            }
            let effects = state.apply(SessionEvent::LoggedOut);
            self.execute(effects);
            true
        });
        if ended {
            info!("Session invalidated after credential was rejected");
        }
        ended
    }
}

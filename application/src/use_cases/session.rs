//! Session use case
//!
//! Drives the session transitions (login, register, hydrate, logout) and the
//! account operations that refresh the stored user. Each transition marks
//! itself pending, awaits the backend, then applies the outcome to the
//! [`SessionStore`].
//!
//! Concurrent transitions are not serialized here; callers that need strict
//! ordering must not dispatch a second transition before the first settles.

use crate::ports::auth_api::{ApiError, AuthApi, Delivery};
use crate::stores::session::SessionStore;
use llmdesk_domain::{
    ApiKeys, DomainError, LoginCredentials, PasswordChange, ProfileUpdate, Registration,
    SessionEvent, SessionState, TransitionKind, User,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller of a session operation
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl SessionError {
    /// Validation failures never reached the backend
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Invalid(e) if e.is_validation())
    }
}

/// Use case for the authentication lifecycle
pub struct SessionUseCase<A: AuthApi + ?Sized + 'static> {
    store: Arc<SessionStore>,
    api: Arc<A>,
}

impl<A: AuthApi + ?Sized + 'static> SessionUseCase<A> {
    pub fn new(store: Arc<SessionStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let credentials = LoginCredentials::new(email, password)?;
        info!(email = credentials.email(), "Logging in");

        self.store.apply(SessionEvent::Started(TransitionKind::Login));
        let result = self.api.login(&credentials).await;
        self.settle_authentication(TransitionKind::Login, result)
    }

    /// Create an account and sign in with it
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, SessionError> {
        let registration = Registration::new(email, password, name)?;
        info!(email = registration.email(), "Registering");

        self.store
            .apply(SessionEvent::Started(TransitionKind::Register));
        let result = self.api.register(&registration).await;
        self.settle_authentication(TransitionKind::Register, result)
    }

    fn settle_authentication(
        &self,
        kind: TransitionKind,
        result: Result<llmdesk_domain::AuthResponse, ApiError>,
    ) -> Result<User, SessionError> {
        match result {
            Ok(response) => {
                let user = response.user.clone();
                self.store.apply(SessionEvent::Authenticated {
                    via: kind,
                    response,
                });
                info!(user_id = %user.id, "{} succeeded", kind);
                Ok(user)
            }
            Err(e) => {
                warn!("{} failed: {}", kind, e);
                self.store.apply(SessionEvent::Rejected {
                    kind,
                    message: e.user_message(),
                });
                Err(e.into())
            }
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// Returns `None` when there was nothing to restore or the token was
    /// refused; in the latter case the stale token is discarded without any
    /// notification.
    pub async fn hydrate(&self) -> Option<User> {
        if !self.store.select(SessionState::can_hydrate) {
            debug!("No persisted session to hydrate");
            return None;
        }

        self.store
            .apply(SessionEvent::Started(TransitionKind::Hydrate));
        match self.api.current_user(Delivery::Silent).await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                self.store.apply(SessionEvent::Hydrated(user.clone()));
                self.store
                    .select(SessionState::is_authenticated)
                    .then_some(user)
            }
            Err(e) => {
                info!("Persisted session rejected: {}", e);
                self.store.apply(SessionEvent::Rejected {
                    kind: TransitionKind::Hydrate,
                    message: e.user_message(),
                });
                None
            }
        }
    }

    /// Sign out. Local state is cleared even if the backend call fails.
    pub async fn logout(&self) {
        self.store.apply(SessionEvent::Started(TransitionKind::Logout));
        if self.store.select(|s| s.token().is_some()) {
            if let Err(e) = self.api.logout().await {
                warn!("Remote logout failed, clearing local session anyway: {}", e);
            }
        }
        self.store.apply(SessionEvent::LoggedOut);
        info!("Logged out");
    }

    /// Store new provider API keys on the account
    pub async fn update_api_keys(&self, keys: ApiKeys) -> Result<User, SessionError> {
        if keys.is_empty() {
            return Err(DomainError::EmptyUpdate.into());
        }
        self.require_authenticated()?;

        let user = self.api.update_api_keys(&keys).await?;
        self.store.apply(SessionEvent::UserReplaced(user.clone()));
        Ok(user)
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, SessionError> {
        update.validate()?;
        self.require_authenticated()?;

        let user = self.api.update_profile(&update).await?;
        self.store.apply(SessionEvent::UserReplaced(user.clone()));
        Ok(user)
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        let change = PasswordChange::new(current_password, new_password)?;
        self.require_authenticated()?;

        self.api.change_password(&change).await?;
        info!("Password changed");
        Ok(())
    }

    /// Overlay keys onto the current user without calling the backend
    pub fn merge_api_keys(&self, keys: ApiKeys) {
        self.store.apply(SessionEvent::ApiKeysMerged(keys));
    }

    pub fn clear_error(&self) {
        self.store.apply(SessionEvent::ErrorCleared);
    }

    fn require_authenticated(&self) -> Result<(), SessionError> {
        if self.store.select(SessionState::is_authenticated) {
            Ok(())
        } else {
            Err(SessionError::NotAuthenticated)
        }
    }
}

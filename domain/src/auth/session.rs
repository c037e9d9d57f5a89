//! Session reducer.
//!
//! [`SessionState`] is a plain value. Every change goes through
//! [`SessionState::apply`], which mutates the state for one [`SessionEvent`]
//! and returns the side effects the owner must carry out (token persistence).
//! No I/O happens here.

use crate::auth::entities::{ApiKeys, AuthResponse, User};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The asynchronous transitions a session goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Login,
    Register,
    Hydrate,
    Logout,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Login => "login",
            TransitionKind::Register => "register",
            TransitionKind::Hydrate => "hydrate",
            TransitionKind::Logout => "logout",
        }
    }

    /// Message used when a rejection carries no text of its own
    pub fn fallback_error(&self) -> &'static str {
        match self {
            TransitionKind::Login => "Login failed",
            TransitionKind::Register => "Registration failed",
            TransitionKind::Hydrate => "Session restore failed",
            TransitionKind::Logout => "Logout failed",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
    Rejected,
}

/// Coarse state-machine position, derived from [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    Hydrating,
    Error,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Anonymous => "anonymous",
            SessionPhase::Authenticating => "authenticating",
            SessionPhase::Authenticated => "authenticated",
            SessionPhase::Hydrating => "hydrating",
            SessionPhase::Error => "error",
        };
        f.write_str(s)
    }
}

/// Something that happened to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A transition's request was dispatched
    Started(TransitionKind),
    /// Login or registration succeeded
    Authenticated {
        via: TransitionKind,
        response: AuthResponse,
    },
    /// A transition's request failed
    Rejected {
        kind: TransitionKind,
        message: String,
    },
    /// The persisted token was accepted and resolved to a user
    Hydrated(User),
    /// Local session cleared, whether by logout or forced invalidation
    LoggedOut,
    /// The backend returned a fresh user record (profile / api-key update)
    UserReplaced(User),
    /// Local-only overlay of API keys onto the current user
    ApiKeysMerged(ApiKeys),
    /// The user acknowledged the current error
    ErrorCleared,
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    PersistToken(String),
    ClearPersistedToken,
}

/// Authentication state held by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
    error: Option<String>,
    in_flight: usize,
    transitions: BTreeMap<TransitionKind, RequestStatus>,
}

impl SessionState {
    /// Empty session, optionally seeded with a persisted token
    pub fn new(persisted_token: Option<String>) -> Self {
        Self {
            token: persisted_token.filter(|t| !t.is_empty()),
            ..Default::default()
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// True while at least one transition request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Latest status of a transition, if it ever ran
    pub fn status(&self, kind: TransitionKind) -> Option<RequestStatus> {
        self.transitions.get(&kind).copied()
    }

    fn is_pending(&self, kind: TransitionKind) -> bool {
        self.status(kind) == Some(RequestStatus::Pending)
    }

    /// Whether the session is currently backed by exactly this credential
    pub fn holds_token(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }

    /// Whether a persisted token is waiting to be hydrated
    pub fn can_hydrate(&self) -> bool {
        self.token.is_some() && !self.is_authenticated && !self.is_pending(TransitionKind::Hydrate)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_pending(TransitionKind::Hydrate) {
            SessionPhase::Hydrating
        } else if self.is_pending(TransitionKind::Login) || self.is_pending(TransitionKind::Register)
        {
            SessionPhase::Authenticating
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else if self.error.is_some() {
            SessionPhase::Error
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Apply one event, returning the effects to execute.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        match event {
            SessionEvent::Started(kind) => {
                self.in_flight += 1;
                self.transitions.insert(kind, RequestStatus::Pending);
                self.error = None;
                Vec::new()
            }
            SessionEvent::Authenticated { via, response } => {
                self.settle(via, RequestStatus::Fulfilled);
                let AuthResponse { token, user } = response;
                self.user = Some(user);
                self.token = Some(token.clone());
                self.is_authenticated = true;
                self.error = None;
                vec![SessionEffect::PersistToken(token)]
            }
            SessionEvent::Rejected {
                kind: TransitionKind::Hydrate,
                ..
            } => {
                self.settle(TransitionKind::Hydrate, RequestStatus::Rejected);
                self.clear_identity();
                vec![SessionEffect::ClearPersistedToken]
            }
            SessionEvent::Rejected { kind, message } => {
                self.settle(kind, RequestStatus::Rejected);
                self.error = Some(if message.trim().is_empty() {
                    kind.fallback_error().to_string()
                } else {
                    message
                });
                Vec::new()
            }
            SessionEvent::Hydrated(user) => {
                self.settle(TransitionKind::Hydrate, RequestStatus::Fulfilled);
                // A logout that landed first wins: never authenticate without a token.
                if self.token.is_some() {
                    self.user = Some(user);
                    self.is_authenticated = true;
                }
                Vec::new()
            }
            SessionEvent::LoggedOut => {
                // Forced invalidation arrives without a Started(Logout).
                if self.is_pending(TransitionKind::Logout) {
                    self.settle(TransitionKind::Logout, RequestStatus::Fulfilled);
                } else {
                    self.transitions
                        .insert(TransitionKind::Logout, RequestStatus::Fulfilled);
                }
                self.clear_identity();
                vec![SessionEffect::ClearPersistedToken]
            }
            SessionEvent::UserReplaced(user) => {
                if self.is_authenticated {
                    self.user = Some(user);
                }
                Vec::new()
            }
            SessionEvent::ApiKeysMerged(keys) => {
                if let Some(user) = self.user.as_mut() {
                    user.merge_api_keys(&keys);
                }
                Vec::new()
            }
            SessionEvent::ErrorCleared => {
                self.error = None;
                Vec::new()
            }
        }
    }

    fn settle(&mut self, kind: TransitionKind, status: RequestStatus) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.transitions.insert(kind, status);
    }

    fn clear_identity(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }
}

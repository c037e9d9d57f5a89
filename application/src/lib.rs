//! Application layer for llmdesk
//!
//! This crate contains the state stores, use cases, port definitions and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod stores;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    auth_api::{ApiError, AuthApi, Delivery, GENERIC_ERROR_MESSAGE},
    credentials::{CredentialProvider, SessionInvalidator},
    key_value_store::{KeyValueStore, StorageError},
    notifier::{NoNotifications, NotificationSink},
};
pub use stores::{AppState, SessionStore, Store, UiStore};
pub use use_cases::session::{SessionError, SessionUseCase};

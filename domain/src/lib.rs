//! Domain layer for llmdesk
//!
//! This crate contains the client-side state of the llmdesk front end as
//! plain values and pure reducers. It has no dependencies on networking,
//! storage or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! The authenticated identity held by the client. [`SessionState::apply`]
//! takes one [`SessionEvent`] and returns the [`SessionEffect`]s (token
//! persistence) its owner must execute.
//!
//! ## Slices
//!
//! UI, LLM provider config, chat, dashboard and evaluation state each
//! implement [`Reducer`]. They hold what the backend returned; they never
//! compute answers, scores or analytics.

pub mod auth;
pub mod chat;
pub mod core;
pub mod dashboard;
pub mod evaluation;
pub mod llm;
pub mod notification;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use auth::{
    credentials::{LoginCredentials, PasswordChange, Registration},
    entities::{ApiKeys, AuthResponse, ProfileUpdate, User},
    session::{
        RequestStatus, SessionEffect, SessionEvent, SessionPhase, SessionState, TransitionKind,
    },
};
pub use chat::{ChatAction, ChatMessage, ChatSession, ChatState, ProviderResponse};
pub use core::{error::DomainError, provider::ProviderId};
pub use dashboard::{DashboardAction, DashboardMetrics, DashboardState, DateRange, UsageStats};
pub use evaluation::{Evaluation, EvaluationAction, EvaluationState, EvaluationStats};
pub use llm::{LlmAction, LlmModel, LlmProvider, LlmSettings, LlmSettingsPatch, LlmState};
pub use notification::{Notification, NotificationId, Severity};
pub use store::Reducer;
pub use ui::{Modal, Theme, UiAction, UiState};

//! Auth API port
//!
//! Defines the interface for the backend's `/api/v1/auth` endpoints.

use async_trait::async_trait;
use llmdesk_domain::{
    ApiKeys, AuthResponse, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User,
};
use thiserror::Error;

/// Message used when a failure carries nothing more specific
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors returned by backend calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized: {}", .detail.as_deref().unwrap_or("invalid or expired credentials"))]
    Unauthorized { detail: Option<String> },

    #[error("Request failed with status code {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Server-provided `detail`, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref().filter(|d| !d.trim().is_empty())
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Best human-readable message: server detail, then transport text,
    /// then a generic fallback.
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        match self {
            ApiError::Transport(msg) | ApiError::Decode(msg) if !msg.trim().is_empty() => {
                msg.clone()
            }
            ApiError::Status { .. } | ApiError::Unauthorized { .. } => self.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// How the gateway authenticates a call and reports its failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Emit notifications and invalidate the session on 401
    #[default]
    Notify,
    /// Return the error to the caller and nothing else
    Silent,
    /// Send without a bearer token and notify on failure.
    ///
    /// For credential exchanges (login, register): a 401 there is a wrong
    /// password, not an expired session.
    Anonymous,
}

impl Delivery {
    /// Whether the current bearer token is attached
    pub fn sends_credentials(self) -> bool {
        !matches!(self, Delivery::Anonymous)
    }
}

/// Backend authentication API
///
/// Implementations live in the infrastructure layer and route every call
/// through the request gateway.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    /// Remote session invalidation. Best effort: always [`Delivery::Silent`].
    async fn logout(&self) -> Result<(), ApiError>;

    async fn current_user(&self, delivery: Delivery) -> Result<User, ApiError>;

    async fn update_api_keys(&self, keys: &ApiKeys) -> Result<User, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::Status {
            status: 500,
            detail: Some("rate limited".to_string()),
        };
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_user_message_without_detail() {
        let err = ApiError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
        assert_eq!(
            ApiError::Transport("connection refused".to_string()).user_message(),
            "connection refused"
        );
        assert_eq!(
            ApiError::Transport(String::new()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_blank_detail_is_ignored() {
        let err = ApiError::Unauthorized {
            detail: Some("  ".to_string()),
        };
        assert!(err.detail().is_none());
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_anonymous_delivery_omits_credentials() {
        assert!(Delivery::Notify.sends_credentials());
        assert!(Delivery::Silent.sends_credentials());
        assert!(!Delivery::Anonymous.sends_credentials());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 400: Email already registered"
        );
    }
}

//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Validation failures are caught here, before anything is dispatched to the
/// backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("Nothing to update")]
    EmptyUpdate,
}

impl DomainError {
    /// Check if this error came from form validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::Required { .. }
                | DomainError::InvalidEmail
                | DomainError::PasswordTooShort { .. }
                | DomainError::EmptyUpdate
        )
    }
}

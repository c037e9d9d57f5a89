//! Validated authentication forms (Value Objects)
//!
//! Everything here is checked before a request is dispatched, so a
//! validation failure never reaches the network.

use crate::core::error::DomainError;
use serde::Serialize;
use std::sync::LazyLock;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Check that `email` is present and looks like an address
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.trim().is_empty() {
        return Err(DomainError::Required { field: "Email" });
    }
    if !EMAIL_PATTERN.is_match(email.trim()) {
        return Err(DomainError::InvalidEmail);
    }
    Ok(())
}

/// Check that `password` is present and long enough
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(DomainError::Required { field: "Password" });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Login form (`POST /auth/login`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        validate_email(&email)?;
        validate_password(&password)?;
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Registration form (`POST /auth/register`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    email: String,
    password: String,
    name: String,
}

impl Registration {
    /// Validate a registration form.
    ///
    /// A blank `name` falls back to the local part of the email address.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        validate_email(&email)?;
        validate_password(&password)?;

        let name = name.into().trim().to_string();
        let name = if name.is_empty() {
            email.split('@').next().unwrap_or_default().to_string()
        } else {
            name
        };
        Ok(Self {
            email,
            password,
            name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Password change form (`POST /auth/change-password`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    current_password: String,
    new_password: String,
}

impl PasswordChange {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let current_password = current_password.into();
        let new_password = new_password.into();
        if current_password.is_empty() {
            return Err(DomainError::Required {
                field: "Current password",
            });
        }
        validate_password(&new_password)?;
        Ok(Self {
            current_password,
            new_password,
        })
    }
}

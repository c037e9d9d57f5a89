//! Authentication entities

use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use crate::auth::credentials::validate_email;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-provider API keys stored on the account.
///
/// The client only cares whether a key is present; the values are whatever
/// the backend chooses to echo (often masked).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
}

impl ApiKeys {
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::OpenAi => self.openai.as_deref(),
            ProviderId::Google => self.google.as_deref(),
            ProviderId::Anthropic => self.anthropic.as_deref(),
        }
    }

    pub fn set(&mut self, provider: ProviderId, key: impl Into<String>) {
        let slot = match provider {
            ProviderId::OpenAi => &mut self.openai,
            ProviderId::Google => &mut self.google,
            ProviderId::Anthropic => &mut self.anthropic,
        };
        *slot = Some(key.into());
    }

    /// Whether a non-empty key is present for the provider
    pub fn is_configured(&self, provider: ProviderId) -> bool {
        self.get(provider).is_some_and(|k| !k.is_empty())
    }

    /// Overlay the keys present in `patch`; absent keys are left alone.
    pub fn merge(&mut self, patch: &ApiKeys) {
        for provider in ProviderId::ALL {
            if let Some(key) = patch.get(provider) {
                self.set(provider, key);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.openai.is_none() && self.google.is_none() && self.anthropic.is_none()
    }
}

/// The authenticated user's identity record (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, alias = "api_keys", skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            api_keys: None,
            settings: Map::new(),
        }
    }

    pub fn with_api_keys(mut self, keys: ApiKeys) -> Self {
        self.api_keys = Some(keys);
        self
    }

    /// Whether the account has a key configured for `provider`
    pub fn has_api_key(&self, provider: ProviderId) -> bool {
        self.api_keys
            .as_ref()
            .is_some_and(|keys| keys.is_configured(provider))
    }

    /// Merge a partial key set into the user's keys
    pub fn merge_api_keys(&mut self, patch: &ApiKeys) {
        self.api_keys.get_or_insert_with(ApiKeys::default).merge(patch);
    }
}

/// Successful login/registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Partial profile update (`PATCH /auth/profile`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl ProfileUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Reject updates that would send nothing or an invalid email
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_none() && self.email.is_none() && self.settings.is_none() {
            return Err(DomainError::EmptyUpdate);
        }
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(DomainError::Required { field: "Name" });
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

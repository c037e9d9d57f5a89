//! LLM provider identifier

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An LLM vendor supported by the backend (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Google,
    Anthropic,
}

impl ProviderId {
    /// All providers, in display order
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Google, ProviderId::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Google => "google",
            ProviderId::Anthropic => "anthropic",
        }
    }

    /// Human-facing vendor name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Google => "Google",
            ProviderId::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "google" => Ok(ProviderId::Google),
            "anthropic" => Ok(ProviderId::Anthropic),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

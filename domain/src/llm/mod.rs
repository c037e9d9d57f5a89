//! LLM provider configuration slice.
//!
//! Holds the provider/model catalog the user picks from and the sampling
//! settings sent with chat requests. Nothing here talks to a provider.

use crate::auth::entities::User;
use crate::core::provider::ProviderId;
use crate::store::Reducer;
use serde::{Deserialize, Serialize};

/// A model offered by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmModel {
    pub id: String,
    pub name: String,
    pub max_tokens: u32,
    pub cost_per_1k_tokens: f64,
}

impl LlmModel {
    fn new(id: &str, name: &str, max_tokens: u32, cost_per_1k_tokens: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_tokens,
            cost_per_1k_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmProvider {
    pub id: ProviderId,
    pub name: String,
    pub models: Vec<LlmModel>,
    pub is_enabled: bool,
    pub api_key_configured: bool,
}

impl LlmProvider {
    fn new(id: ProviderId, models: Vec<LlmModel>) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            models,
            is_enabled: true,
            api_key_configured: false,
        }
    }

    /// Enabled and holding a key
    pub fn is_usable(&self) -> bool {
        self.is_enabled && self.api_key_configured
    }
}

/// Sampling settings applied to outgoing chat requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub selected_models: Vec<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 1.0,
            selected_models: vec![
                "gpt-4".to_string(),
                "gemini-pro".to_string(),
                "claude-3-sonnet".to_string(),
            ],
        }
    }
}

/// Partial settings update; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmSettingsPatch {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub selected_models: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmState {
    pub providers: Vec<LlmProvider>,
    pub settings: LlmSettings,
    pub is_querying: bool,
}

impl Default for LlmState {
    fn default() -> Self {
        Self {
            providers: vec![
                LlmProvider::new(
                    ProviderId::OpenAi,
                    vec![
                        LlmModel::new("gpt-4", "GPT-4", 8192, 0.03),
                        LlmModel::new("gpt-3.5-turbo", "GPT-3.5 Turbo", 4096, 0.001),
                    ],
                ),
                LlmProvider::new(
                    ProviderId::Google,
                    vec![LlmModel::new("gemini-pro", "Gemini Pro", 32768, 0.001)],
                ),
                LlmProvider::new(
                    ProviderId::Anthropic,
                    vec![
                        LlmModel::new("claude-3-opus", "Claude 3 Opus", 200_000, 0.015),
                        LlmModel::new("claude-3-sonnet", "Claude 3 Sonnet", 200_000, 0.003),
                        LlmModel::new("claude-3-haiku", "Claude 3 Haiku", 200_000, 0.0025),
                    ],
                ),
            ],
            settings: LlmSettings::default(),
            is_querying: false,
        }
    }
}

impl LlmState {
    pub fn provider(&self, id: ProviderId) -> Option<&LlmProvider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Find the provider that offers `model_id`
    pub fn provider_of(&self, model_id: &str) -> Option<&LlmProvider> {
        self.providers
            .iter()
            .find(|p| p.models.iter().any(|m| m.id == model_id))
    }

    /// Selected models whose provider is enabled and has a key
    pub fn usable_selected_models(&self) -> Vec<&str> {
        self.settings
            .selected_models
            .iter()
            .filter(|id| self.provider_of(id).is_some_and(LlmProvider::is_usable))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LlmAction {
    SetProviderEnabled { provider: ProviderId, enabled: bool },
    SetApiKeyConfigured { provider: ProviderId, configured: bool },
    /// Mirror a user's key presence onto every provider
    SyncApiKeys(Option<User>),
    UpdateSettings(LlmSettingsPatch),
    SetQuerying(bool),
}

impl Reducer for LlmState {
    type Action = LlmAction;

    fn reduce(&mut self, action: LlmAction) {
        match action {
            LlmAction::SetProviderEnabled { provider, enabled } => {
                if let Some(p) = self.providers.iter_mut().find(|p| p.id == provider) {
                    p.is_enabled = enabled;
                }
            }
            LlmAction::SetApiKeyConfigured {
                provider,
                configured,
            } => {
                if let Some(p) = self.providers.iter_mut().find(|p| p.id == provider) {
                    p.api_key_configured = configured;
                }
            }
            LlmAction::SyncApiKeys(user) => {
                for p in &mut self.providers {
                    p.api_key_configured = user.as_ref().is_some_and(|u| u.has_api_key(p.id));
                }
            }
            LlmAction::UpdateSettings(patch) => {
                let s = &mut self.settings;
                if let Some(v) = patch.temperature {
                    s.temperature = v;
                }
                if let Some(v) = patch.max_tokens {
                    s.max_tokens = v;
                }
                if let Some(v) = patch.top_p {
                    s.top_p = v;
                }
                if let Some(v) = patch.selected_models {
                    s.selected_models = v;
                }
            }
            LlmAction::SetQuerying(querying) => self.is_querying = querying,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::entities::ApiKeys;

    #[test]
    fn test_default_catalog() {
        let state = LlmState::default();
        assert_eq!(state.providers.len(), 3);
        assert_eq!(state.provider(ProviderId::Anthropic).unwrap().models.len(), 3);
        assert!(state.providers.iter().all(|p| p.is_enabled && !p.api_key_configured));
        assert_eq!(state.settings.max_tokens, 2048);
    }

    #[test]
    fn test_provider_of_model() {
        let state = LlmState::default();
        assert_eq!(state.provider_of("gemini-pro").unwrap().id, ProviderId::Google);
        assert!(state.provider_of("llama").is_none());
    }

    #[test]
    fn test_sync_api_keys_from_user() {
        let mut state = LlmState::default();
        let mut keys = ApiKeys::default();
        keys.set(ProviderId::OpenAi, "sk-1");
        let user = User::new("1", "a@b.com", "A").with_api_keys(keys);

        state.reduce(LlmAction::SyncApiKeys(Some(user)));
        assert!(state.provider(ProviderId::OpenAi).unwrap().api_key_configured);
        assert!(!state.provider(ProviderId::Google).unwrap().api_key_configured);

        state.reduce(LlmAction::SyncApiKeys(None));
        assert!(!state.provider(ProviderId::OpenAi).unwrap().api_key_configured);
    }

    #[test]
    fn test_usable_selected_models() {
        let mut state = LlmState::default();
        state.reduce(LlmAction::SetApiKeyConfigured {
            provider: ProviderId::Anthropic,
            configured: true,
        });
        assert_eq!(state.usable_selected_models(), vec!["claude-3-sonnet"]);

        state.reduce(LlmAction::SetProviderEnabled {
            provider: ProviderId::Anthropic,
            enabled: false,
        });
        assert!(state.usable_selected_models().is_empty());
    }

    #[test]
    fn test_partial_settings_update() {
        let mut state = LlmState::default();
        state.reduce(LlmAction::UpdateSettings(LlmSettingsPatch {
            temperature: Some(0.2),
            ..Default::default()
        }));
        assert_eq!(state.settings.temperature, 0.2);
        assert_eq!(state.settings.max_tokens, 2048);
        assert_eq!(state.settings.selected_models.len(), 3);
    }
}

//! Console output formatter for session, account and provider state

use colored::Colorize;
use llmdesk_domain::core::string::{mask_secret, truncate};
use llmdesk_domain::{
    LlmState, Notification, ProviderId, SessionPhase, SessionState, Severity, Theme, User,
};
use serde::Serialize;

/// Longest notification message printed on one line
const MAX_NOTIFICATION_LEN: usize = 300;

/// Formats client state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a user's account details
    pub fn format_user(user: &User) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Account"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Name: ".cyan().bold(), user.name));
        output.push_str(&format!("{} {}\n", "Email:".cyan().bold(), user.email));
        output.push_str(&format!("{} {}\n", "ID:   ".cyan().bold(), user.id.dimmed()));

        output.push_str(&Self::section_header("API keys"));
        for provider in ProviderId::ALL {
            let key = user
                .api_keys
                .as_ref()
                .and_then(|keys| keys.get(provider))
                .filter(|k| !k.is_empty());
            let status = match key {
                Some(k) => mask_secret(k).green().to_string(),
                None => "not set".dimmed().to_string(),
            };
            output.push_str(&format!("  {:<10} {}\n", provider.display_name(), status));
        }

        if !user.settings.is_empty() {
            output.push_str(&Self::section_header("Settings"));
            for (key, value) in &user.settings {
                output.push_str(&format!("  {} = {}\n", key, value));
            }
        }

        output
    }

    /// Format a one-line session summary
    pub fn format_session(state: &SessionState) -> String {
        let phase = match state.phase() {
            SessionPhase::Authenticated => "signed in".green().bold(),
            SessionPhase::Error => "error".red().bold(),
            SessionPhase::Anonymous => "signed out".yellow().bold(),
            other => other.to_string().cyan().bold(),
        };

        let mut output = format!("{} {}", "Session:".bold(), phase);
        if let Some(user) = state.user() {
            output.push_str(&format!(" as {} <{}>", user.name, user.email));
        }
        if let Some(error) = state.error() {
            output.push_str(&format!("\n{} {}", "Error:".red().bold(), error));
        }
        output.push('\n');
        output
    }

    /// Format the provider catalog with enablement and key status
    pub fn format_providers(llm: &LlmState) -> String {
        let mut output = Self::header("LLM Providers");
        output.push('\n');

        for provider in &llm.providers {
            let marker = if provider.is_usable() {
                "v".green()
            } else {
                "x".red()
            };
            let enabled = if provider.is_enabled {
                "enabled".normal()
            } else {
                "disabled".dimmed()
            };
            let key = if provider.api_key_configured {
                "key configured".green()
            } else {
                "no key".yellow()
            };
            output.push_str(&format!(
                "\n{} {} ({}, {})\n",
                marker,
                provider.name.bold(),
                enabled,
                key
            ));
            for model in &provider.models {
                let selected = llm.settings.selected_models.contains(&model.id);
                output.push_str(&format!(
                    "    {} {:<16} {:>7} tokens  ${:.4}/1k\n",
                    if selected { "*" } else { " " },
                    model.id,
                    model.max_tokens,
                    model.cost_per_1k_tokens
                ));
            }
        }

        output.push_str(&format!(
            "\n{} temperature {}  max_tokens {}  top_p {}\n",
            "Settings:".cyan().bold(),
            llm.settings.temperature,
            llm.settings.max_tokens,
            llm.settings.top_p
        ));
        output
    }

    /// Format a notification as a single colored line
    pub fn format_notification(notification: &Notification) -> String {
        let label = match notification.severity {
            Severity::Success => "success".green().bold(),
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".cyan().bold(),
        };
        format!(
            "{} {}",
            label,
            truncate(&notification.message, MAX_NOTIFICATION_LEN)
        )
    }

    pub fn format_theme(theme: Theme) -> String {
        format!("{} {}\n", "Theme:".bold(), theme.as_str())
    }

    /// Format any serializable value as pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(40);
        format!("{}\n{:^40}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmdesk_domain::{ApiKeys, AuthResponse, LlmAction, Reducer, SessionEvent, TransitionKind};

    fn user_with_key() -> User {
        let mut keys = ApiKeys::default();
        keys.set(ProviderId::OpenAi, "sk-abcdef1234");
        User::new("42", "ada@example.com", "Ada").with_api_keys(keys)
    }

    #[test]
    fn test_format_user_masks_keys() {
        let output = ConsoleFormatter::format_user(&user_with_key());
        assert!(output.contains("ada@example.com"));
        assert!(output.contains("1234"));
        assert!(!output.contains("sk-abcdef"));
        assert!(output.contains("not set"));
    }

    #[test]
    fn test_format_session_states() {
        let mut state = SessionState::default();
        assert!(ConsoleFormatter::format_session(&state).contains("signed out"));

        state.apply(SessionEvent::Started(TransitionKind::Login));
        state.apply(SessionEvent::Authenticated {
            via: TransitionKind::Login,
            response: AuthResponse {
                token: "t1".to_string(),
                user: user_with_key(),
            },
        });
        let output = ConsoleFormatter::format_session(&state);
        assert!(output.contains("signed in"));
        assert!(output.contains("ada@example.com"));
    }

    #[test]
    fn test_format_providers_marks_selected_models() {
        let mut llm = LlmState::default();
        llm.reduce(LlmAction::SyncApiKeys(Some(user_with_key())));
        let output = ConsoleFormatter::format_providers(&llm);
        assert!(output.contains("OpenAI"));
        assert!(output.contains("key configured"));
        assert!(output.contains("* gpt-4"));
    }

    #[test]
    fn test_format_notification() {
        let output = ConsoleFormatter::format_notification(&Notification::error("rate limited"));
        assert!(output.contains("rate limited"));
    }

    #[test]
    fn test_format_json() {
        let json = ConsoleFormatter::format_json(&user_with_key());
        assert!(json.contains("\"email\": \"ada@example.com\""));
    }
}

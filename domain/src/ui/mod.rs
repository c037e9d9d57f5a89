//! UI state slice: theme, sidebar, notifications and modal visibility.

use crate::core::error::DomainError;
use crate::notification::{Notification, NotificationId};
use crate::store::Reducer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(DomainError::InvalidTheme(other.to_string())),
        }
    }
}

/// Dialogs the UI can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    ApiKeySettings,
    UserProfile,
    SessionHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalVisibility {
    pub api_key_settings: bool,
    pub user_profile: bool,
    pub session_history: bool,
}

impl ModalVisibility {
    fn slot(&mut self, modal: Modal) -> &mut bool {
        match modal {
            Modal::ApiKeySettings => &mut self.api_key_settings,
            Modal::UserProfile => &mut self.user_profile,
            Modal::SessionHistory => &mut self.session_history,
        }
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::ApiKeySettings => self.api_key_settings,
            Modal::UserProfile => self.user_profile,
            Modal::SessionHistory => self.session_history,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub theme: Theme,
    pub sidebar_open: bool,
    pub notifications: Vec<Notification>,
    pub modals: ModalVisibility,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sidebar_open: true,
            notifications: Vec::new(),
            modals: ModalVisibility::default(),
        }
    }
}

impl UiState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ToggleTheme,
    SetTheme(Theme),
    ToggleSidebar,
    SetSidebarOpen(bool),
    AddNotification(Notification),
    RemoveNotification(NotificationId),
    OpenModal(Modal),
    CloseModal(Modal),
}

impl Reducer for UiState {
    type Action = UiAction;

    fn reduce(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleTheme => self.theme = self.theme.toggled(),
            UiAction::SetTheme(theme) => self.theme = theme,
            UiAction::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            UiAction::SetSidebarOpen(open) => self.sidebar_open = open,
            UiAction::AddNotification(n) => {
                // ids stay unique within the live set
                if !self.notifications.iter().any(|live| live.id == n.id) {
                    self.notifications.push(n);
                }
            }
            UiAction::RemoveNotification(id) => self.notifications.retain(|n| n.id != id),
            UiAction::OpenModal(modal) => *self.modals.slot(modal) = true,
            UiAction::CloseModal(modal) => *self.modals.slot(modal) = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert_eq!(state.theme, Theme::Light);
        assert!(state.sidebar_open);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_toggle_theme_twice_restores() {
        let mut state = UiState::default();
        state.reduce(UiAction::ToggleTheme);
        assert_eq!(state.theme, Theme::Dark);
        state.reduce(UiAction::ToggleTheme);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_notifications_add_and_remove() {
        let mut state = UiState::default();
        let first = Notification::info("one");
        let second = Notification::error("two");
        state.reduce(UiAction::AddNotification(first.clone()));
        state.reduce(UiAction::AddNotification(second.clone()));
        state.reduce(UiAction::AddNotification(first.clone()));
        assert_eq!(state.notifications.len(), 2);

        state.reduce(UiAction::RemoveNotification(first.id));
        assert_eq!(state.notifications, vec![second]);
    }

    #[test]
    fn test_modals() {
        let mut state = UiState::default();
        state.reduce(UiAction::OpenModal(Modal::UserProfile));
        assert!(state.modals.is_open(Modal::UserProfile));
        assert!(!state.modals.is_open(Modal::SessionHistory));
        state.reduce(UiAction::CloseModal(Modal::UserProfile));
        assert!(!state.modals.is_open(Modal::UserProfile));
    }

    #[test]
    fn test_sidebar() {
        let mut state = UiState::default();
        state.reduce(UiAction::ToggleSidebar);
        assert!(!state.sidebar_open);
        state.reduce(UiAction::SetSidebarOpen(true));
        assert!(state.sidebar_open);
    }
}

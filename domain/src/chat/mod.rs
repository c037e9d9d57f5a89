//! Chat state slice.
//!
//! Conversations and the per-provider answers the backend returned for each
//! user message. The client never produces answers itself.

use crate::core::provider::ProviderId;
use crate::store::Reducer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
}

/// One provider's answer to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    pub provider: ProviderId,
    pub model: String,
    pub content: String,
    /// Milliseconds
    pub response_time: u64,
    pub token_count: u64,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub responses: Vec<ProviderResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    pub sessions: Vec<ChatSession>,
    pub current_session_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ChatState {
    pub fn current_session(&self) -> Option<&ChatSession> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    SetCurrentSession(String),
    AddMessage(ChatMessage),
    /// Insert or replace the answer from `response.provider`
    UpsertResponse {
        message_id: String,
        response: ProviderResponse,
    },
    SetSessions(Vec<ChatSession>),
    SetMessages(Vec<ChatMessage>),
    SetLoading(bool),
    SetError(Option<String>),
}

impl Reducer for ChatState {
    type Action = ChatAction;

    fn reduce(&mut self, action: ChatAction) {
        match action {
            ChatAction::SetCurrentSession(id) => self.current_session_id = Some(id),
            ChatAction::AddMessage(message) => self.messages.push(message),
            ChatAction::UpsertResponse {
                message_id,
                response,
            } => {
                let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) else {
                    return;
                };
                match message
                    .responses
                    .iter_mut()
                    .find(|r| r.provider == response.provider)
                {
                    Some(existing) => *existing = response,
                    None => message.responses.push(response),
                }
            }
            ChatAction::SetSessions(sessions) => self.sessions = sessions,
            ChatAction::SetMessages(messages) => self.messages = messages,
            ChatAction::SetLoading(loading) => self.is_loading = loading,
            ChatAction::SetError(error) => self.error = error,
        }
    }
}

//! Evaluation state slice.
//!
//! Human ratings of provider answers and the per-provider aggregates the
//! backend computed from them.

use crate::store::Reducer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub usefulness: f32,
    pub accuracy: f32,
    pub creativity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub message_id: String,
    pub provider: String,
    pub user_id: String,
    pub ratings: Ratings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStats {
    pub provider: String,
    pub average_ratings: Ratings,
    pub total_evaluations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationState {
    pub evaluations: Vec<Evaluation>,
    pub stats: Vec<EvaluationStats>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl EvaluationState {
    /// Evaluations recorded for one message
    pub fn for_message<'a>(&'a self, message_id: &'a str) -> impl Iterator<Item = &'a Evaluation> {
        self.evaluations
            .iter()
            .filter(move |e| e.message_id == message_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationAction {
    Add(Evaluation),
    SetEvaluations(Vec<Evaluation>),
    SetStats(Vec<EvaluationStats>),
    SetLoading(bool),
    SetError(Option<String>),
}

impl Reducer for EvaluationState {
    type Action = EvaluationAction;

    fn reduce(&mut self, action: EvaluationAction) {
        match action {
            EvaluationAction::Add(evaluation) => self.evaluations.push(evaluation),
            EvaluationAction::SetEvaluations(evaluations) => self.evaluations = evaluations,
            EvaluationAction::SetStats(stats) => self.stats = stats,
            EvaluationAction::SetLoading(loading) => self.is_loading = loading,
            EvaluationAction::SetError(error) => self.error = error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(id: &str, message_id: &str) -> Evaluation {
        Evaluation {
            id: id.to_string(),
            message_id: message_id.to_string(),
            provider: "anthropic".to_string(),
            user_id: "u1".to_string(),
            ratings: Ratings {
                usefulness: 4.0,
                accuracy: 5.0,
                creativity: 3.0,
            },
            feedback: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_add_and_filter_by_message() {
        let mut state = EvaluationState::default();
        state.reduce(EvaluationAction::Add(evaluation("e1", "m1")));
        state.reduce(EvaluationAction::Add(evaluation("e2", "m2")));
        state.reduce(EvaluationAction::Add(evaluation("e3", "m1")));

        let ids: Vec<_> = state.for_message("m1").map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3"]);
    }

    #[test]
    fn test_set_error() {
        let mut state = EvaluationState::default();
        state.reduce(EvaluationAction::SetError(Some("boom".to_string())));
        assert_eq!(state.error.as_deref(), Some("boom"));
        state.reduce(EvaluationAction::SetError(None));
        assert!(state.error.is_none());
    }
}

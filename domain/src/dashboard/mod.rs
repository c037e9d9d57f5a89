//! Dashboard state slice.
//!
//! Usage rows and headline metrics exactly as the backend reports them,
//! plus the date range the user is looking at.

use crate::store::Reducer;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default look-back window for the dashboard
pub const DEFAULT_RANGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub provider: String,
    pub model: String,
    pub date: String,
    pub request_count: u64,
    pub token_count: u64,
    pub total_cost: f64,
    pub average_response_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_requests: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub average_response_time: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// The `days` days leading up to `end`
    pub fn trailing_days(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub usage_stats: Vec<UsageStats>,
    pub metrics: DashboardMetrics,
    pub date_range: DateRange,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            usage_stats: Vec::new(),
            metrics: DashboardMetrics::default(),
            date_range: DateRange::trailing_days(now, DEFAULT_RANGE_DAYS),
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    SetUsageStats(Vec<UsageStats>),
    SetMetrics(DashboardMetrics),
    SetDateRange(DateRange),
    SetLoading(bool),
    SetError(Option<String>),
}

impl Reducer for DashboardState {
    type Action = DashboardAction;

    fn reduce(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::SetUsageStats(stats) => self.usage_stats = stats,
            DashboardAction::SetMetrics(metrics) => self.metrics = metrics,
            DashboardAction::SetDateRange(range) => self.date_range = range,
            DashboardAction::SetLoading(loading) => self.is_loading = loading,
            DashboardAction::SetError(error) => self.error = error,
        }
    }
}

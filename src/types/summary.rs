//! Dataset-wide summaries consumed by the insight generator
//!
//! Each summary carries its own conversation count so shares are always
//! computed against the conversations that actually contributed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub total_conversations: usize,
    pub total_messages: usize,
    pub user_messages: usize,
    pub match_messages: usize,
}

impl OverviewMetrics {
    /// Mean messages per conversation (0 when there are none)
    pub fn average_messages(&self) -> f64 {
        if self.total_conversations == 0 {
            return 0.0;
        }
        self.total_messages as f64 / self.total_conversations as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceMetrics {
    pub conversation_count: usize,
    pub balanced: usize,
    pub user_dominated: usize,
    pub match_dominated: usize,
    pub heavily_imbalanced: usize,
    pub average_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingMetrics {
    pub conversation_count: usize,
    pub very_fast: usize,
    pub fast: usize,
    pub moderate: usize,
    pub slow: usize,
    pub very_slow: usize,
    /// Mean of per-conversation averages, milliseconds
    pub average_response_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthMetrics {
    pub conversation_count: usize,
    pub very_short: usize,
    pub short: usize,
    pub medium: usize,
    pub long: usize,
    pub very_long: usize,
    pub average_length: f64,
}

/// Everything `generate_all_insights` needs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetrics {
    pub overview: OverviewMetrics,
    pub balance: BalanceMetrics,
    pub timing: TimingMetrics,
    pub length: LengthMetrics,
}

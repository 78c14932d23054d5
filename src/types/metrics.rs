//! Numeric summaries of a conversation

use serde::{Deserialize, Serialize};

/// Message counts and the split between the two sides
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCountMetrics {
    pub total: usize,
    pub user_messages: usize,
    pub match_messages: usize,
    /// Share sent by the user (0.0-1.0)
    pub user_ratio: f64,
    /// Share sent by the match (0.0-1.0)
    pub match_ratio: f64,
    /// min(user_ratio, match_ratio): 0.0 one-sided, 0.5 perfectly even
    pub balance: f64,
}

impl MessageCountMetrics {
    /// Build from raw counts, guarding the empty case
    pub fn from_counts(user_messages: usize, match_messages: usize) -> Self {
        let total = user_messages + match_messages;
        if total == 0 {
            return Self::default();
        }

        let user_ratio = user_messages as f64 / total as f64;
        let match_ratio = match_messages as f64 / total as f64;

        Self {
            total,
            user_messages,
            match_messages,
            user_ratio,
            match_ratio,
            balance: user_ratio.min(match_ratio),
        }
    }
}

/// Response-gap statistics. All durations in milliseconds.
///
/// Only exists when at least one gap was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTimeMetrics {
    pub average_response_time: f64,
    pub median_response_time: f64,
    pub fastest_response: f64,
    pub slowest_response: f64,
    /// Average gap when the user was the one responding (0 if never)
    pub average_user_response: f64,
    /// Average gap when the match was the one responding (0 if never)
    pub average_match_response: f64,
    pub sample_count: usize,
}

/// Per-conversation bundle consumed by the batch analyzer and summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMetrics {
    pub match_id: String,
    pub counts: MessageCountMetrics,
    pub timing: Option<ResponseTimeMetrics>,
}

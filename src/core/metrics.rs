//! Metrics Aggregator: message counts and response-gap statistics
//!
//! A response gap is the time from the last message of one side's turn to the
//! first message of the other side's reply. Consecutive messages from the
//! same side are one turn and produce no gap.

use crate::types::{
    Conversation, ConversationMetrics, Direction, MessageCountMetrics, NormalizedMessage,
    ResponseTimeMetrics,
};

/// Stateless aggregator over a conversation's messages
#[derive(Debug, Default)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Tally messages by direction
    pub fn count_messages(&self, messages: &[NormalizedMessage]) -> MessageCountMetrics {
        let (user, other) = messages.iter().fold((0usize, 0usize), |(u, m), msg| {
            match msg.direction {
                Direction::User => (u + 1, m),
                Direction::Match => (u, m + 1),
            }
        });
        MessageCountMetrics::from_counts(user, other)
    }

    /// Response-gap statistics, or None when no side ever answered the other
    pub fn response_times(&self, messages: &[NormalizedMessage]) -> Option<ResponseTimeMetrics> {
        let mut sorted: Vec<&NormalizedMessage> = messages.iter().collect();
        sorted.sort_by_key(|m| m.sent_at);

        let mut gaps: Vec<f64> = Vec::new();
        let mut user_gaps: Vec<f64> = Vec::new();
        let mut match_gaps: Vec<f64> = Vec::new();

        for pair in sorted.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if prev.direction == curr.direction {
                continue;
            }

            let gap = (curr.sent_at - prev.sent_at).num_milliseconds().max(0) as f64;
            gaps.push(gap);
            match curr.direction {
                Direction::User => user_gaps.push(gap),
                Direction::Match => match_gaps.push(gap),
            }
        }

        if gaps.is_empty() {
            return None;
        }

        let sample_count = gaps.len();
        let average_response_time = mean(&gaps);
        gaps.sort_by(|a, b| a.total_cmp(b));

        Some(ResponseTimeMetrics {
            average_response_time,
            median_response_time: median_sorted(&gaps),
            fastest_response: gaps[0],
            slowest_response: gaps[sample_count - 1],
            average_user_response: mean(&user_gaps),
            average_match_response: mean(&match_gaps),
            sample_count,
        })
    }

    /// Both metric families for one conversation
    pub fn conversation_metrics(&self, conversation: &Conversation) -> ConversationMetrics {
        ConversationMetrics {
            match_id: conversation.match_id.clone(),
            counts: self.count_messages(&conversation.messages),
            timing: self.response_times(&conversation.messages),
        }
    }

    /// Metrics for every conversation, in input order
    pub fn all_conversation_metrics(&self, conversations: &[Conversation]) -> Vec<ConversationMetrics> {
        conversations
            .iter()
            .map(|c| self.conversation_metrics(c))
            .collect()
    }
}

/// Mean, 0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a non-empty sorted slice
fn median_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Dataset summaries: bucket every conversation for the insight generator
//!
//! Balance (per conversation with at least one message):
//! - balanced: balance >= 0.4
//! - user/match dominated: that side sent more than 60%
//! - heavily imbalanced: balance < 0.2
//!
//! Timing buckets: 5 min / 1 h / 12 h / 48 h. Length buckets: 5 / 20 / 50 / 100 messages.

use crate::types::{
    BalanceMetrics, ConversationMetrics, DatasetMetrics, LengthMetrics, OverviewMetrics,
    TimingMetrics,
};
use crate::{HOUR_MS, MINUTE_MS};

const BALANCED_AT: f64 = 0.4;
const DOMINATED_ABOVE: f64 = 0.6;
const HEAVILY_IMBALANCED_BELOW: f64 = 0.2;

const VERY_FAST_MS: f64 = 5.0 * MINUTE_MS;
const FAST_MS: f64 = HOUR_MS;
const MODERATE_MS: f64 = 12.0 * HOUR_MS;
const SLOW_MS: f64 = 48.0 * HOUR_MS;

const VERY_SHORT_BELOW: usize = 5;
const SHORT_BELOW: usize = 20;
const MEDIUM_BELOW: usize = 50;
const LONG_BELOW: usize = 100;

/// Summarize every conversation in one pass per family
pub fn summarize(conversations: &[ConversationMetrics]) -> DatasetMetrics {
    DatasetMetrics {
        overview: summarize_overview(conversations),
        balance: summarize_balance(conversations),
        timing: summarize_timing(conversations),
        length: summarize_length(conversations),
    }
}

pub fn summarize_overview(conversations: &[ConversationMetrics]) -> OverviewMetrics {
    conversations.iter().fold(
        OverviewMetrics {
            total_conversations: conversations.len(),
            ..OverviewMetrics::default()
        },
        |mut acc, c| {
            acc.total_messages += c.counts.total;
            acc.user_messages += c.counts.user_messages;
            acc.match_messages += c.counts.match_messages;
            acc
        },
    )
}

pub fn summarize_balance(conversations: &[ConversationMetrics]) -> BalanceMetrics {
    let mut metrics = BalanceMetrics::default();
    let mut balance_sum = 0.0;

    for counts in conversations.iter().map(|c| &c.counts).filter(|c| c.total > 0) {
        metrics.conversation_count += 1;
        balance_sum += counts.balance;

        if counts.balance >= BALANCED_AT {
            metrics.balanced += 1;
        }
        if counts.user_ratio > DOMINATED_ABOVE {
            metrics.user_dominated += 1;
        }
        if counts.match_ratio > DOMINATED_ABOVE {
            metrics.match_dominated += 1;
        }
        if counts.balance < HEAVILY_IMBALANCED_BELOW {
            metrics.heavily_imbalanced += 1;
        }
    }

    if metrics.conversation_count > 0 {
        metrics.average_balance = balance_sum / metrics.conversation_count as f64;
    }
    metrics
}

pub fn summarize_timing(conversations: &[ConversationMetrics]) -> TimingMetrics {
    let mut metrics = TimingMetrics::default();
    let mut sum = 0.0;

    for timing in conversations.iter().filter_map(|c| c.timing.as_ref()) {
        let avg = timing.average_response_time;
        metrics.conversation_count += 1;
        sum += avg;

        if avg < VERY_FAST_MS {
            metrics.very_fast += 1;
        } else if avg < FAST_MS {
            metrics.fast += 1;
        } else if avg < MODERATE_MS {
            metrics.moderate += 1;
        } else if avg < SLOW_MS {
            metrics.slow += 1;
        } else {
            metrics.very_slow += 1;
        }
    }

    if metrics.conversation_count > 0 {
        metrics.average_response_time = sum / metrics.conversation_count as f64;
    }
    metrics
}

pub fn summarize_length(conversations: &[ConversationMetrics]) -> LengthMetrics {
    let mut metrics = LengthMetrics::default();
    let mut sum = 0usize;

    for total in conversations.iter().map(|c| c.counts.total).filter(|t| *t > 0) {
        metrics.conversation_count += 1;
        sum += total;

        match total {
            t if t < VERY_SHORT_BELOW => metrics.very_short += 1,
            t if t < SHORT_BELOW => metrics.short += 1,
            t if t < MEDIUM_BELOW => metrics.medium += 1,
            t if t < LONG_BELOW => metrics.long += 1,
            _ => metrics.very_long += 1,
        }
    }

    if metrics.conversation_count > 0 {
        metrics.average_length = sum as f64 / metrics.conversation_count as f64;
    }
    metrics
}

// =============================================================================
// TESTS
// =============================================================================

//! Integration tests for the Metrics Aggregator
//!
//! - ratios sum to 1 and balance is the smaller share
//! - response gaps only between alternating sides
//! - no timing metrics without a reply

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rapport::core::MetricsAggregator;
use rapport::types::{Conversation, Direction, NormalizedMessage};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 14, 18, 0, 0).unwrap()
}

fn message(seq: usize, minutes: i64, direction: Direction) -> NormalizedMessage {
    let sender = match direction {
        Direction::User => "me",
        Direction::Match => "alex",
    };
    NormalizedMessage::new(
        format!("msg-{}", seq),
        "alex",
        sender,
        base() + Duration::minutes(minutes),
        "hello there",
        direction,
    )
}

/// Ratios sum to 1 and balance is the smaller share for every split
#[test]
fn test_ratio_invariants_over_many_splits() {
    let aggregator = MetricsAggregator::new();
    for user in 0..8 {
        for other in 0..8 {
            if user + other == 0 {
                continue;
            }
            let mut messages = Vec::new();
            for i in 0..user {
                messages.push(message(i, i as i64, Direction::User));
            }
            for i in 0..other {
                messages.push(message(100 + i, i as i64, Direction::Match));
            }

            let counts = aggregator.count_messages(&messages);
            assert_eq!(counts.total, user + other);
            assert!((counts.user_ratio + counts.match_ratio - 1.0).abs() < 1e-12);
            assert_eq!(counts.balance, counts.user_ratio.min(counts.match_ratio));
            assert!(counts.balance >= 0.0 && counts.balance <= 0.5);
            assert_eq!(counts.balance == 0.0, user == 0 || other == 0);
        }
    }
}

/// Gaps are measured between turns, split by who replied
#[test]
fn test_realistic_conversation() {
    let aggregator = MetricsAggregator::new();
    // me: 0, 1 | alex: 6 | me: 66 | alex: 67, 70
    let conversation = Conversation::new(
        "alex",
        vec![
            message(1, 0, Direction::User),
            message(2, 1, Direction::User),
            message(3, 6, Direction::Match),
            message(4, 66, Direction::User),
            message(5, 67, Direction::Match),
            message(6, 70, Direction::Match),
        ],
    );

    let metrics = aggregator.conversation_metrics(&conversation);
    assert_eq!(metrics.match_id, "alex");
    assert_eq!(metrics.counts.user_messages, 3);
    assert_eq!(metrics.counts.match_messages, 3);
    assert_eq!(metrics.counts.balance, 0.5);

    let timing = metrics.timing.unwrap();
    // gaps: 5 min (alex), 60 min (me), 1 min (alex)
    assert_eq!(timing.sample_count, 3);
    assert_eq!(timing.fastest_response, 60_000.0);
    assert_eq!(timing.slowest_response, 3_600_000.0);
    assert_eq!(timing.median_response_time, 300_000.0);
    assert_eq!(timing.average_response_time, 22.0 * 60_000.0);
    assert_eq!(timing.average_user_response, 3_600_000.0);
    assert_eq!(timing.average_match_response, 180_000.0);
}

/// Without a reply there is no timing
#[test]
fn test_monologue_has_no_timing() {
    let aggregator = MetricsAggregator::new();
    let conversation = Conversation::new(
        "alex",
        (0..5).map(|i| message(i, i as i64 * 60, Direction::User)).collect(),
    );
    let metrics = aggregator.conversation_metrics(&conversation);
    assert_eq!(metrics.counts.balance, 0.0);
    assert!(metrics.timing.is_none());
}

/// An empty conversation has zero ratios and no timing
#[test]
fn test_empty_conversation() {
    let aggregator = MetricsAggregator::new();
    let metrics = aggregator.conversation_metrics(&Conversation::new("nobody", vec![]));
    assert_eq!(metrics.counts.total, 0);
    assert_eq!(metrics.counts.user_ratio, 0.0);
    assert_eq!(metrics.counts.match_ratio, 0.0);
    assert!(metrics.timing.is_none());
}

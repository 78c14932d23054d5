//! Integration tests for the Insight Generator
//!
//! - severity and narrative thresholds are shares, never absolute counts
//! - generate_all_insights skips empty families and keeps a fixed order
//! - pattern insights never echo message text
//! - dataset summary cuts land in the documented bucket

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rapport::core::summary::{summarize_balance, summarize_length, summarize_timing};
use rapport::core::{
    analyze_messages, generate_all_insights, generate_balance_insight, generate_length_insight,
    generate_pattern_insight, generate_timing_insight, summarize, MetricsAggregator,
    PatternClassifier,
};
use rapport::types::{
    BalanceMetrics, Conversation, ConversationMetrics, DatasetMetrics, Direction, InsightCategory,
    LengthMetrics, MessageCountMetrics, NormalizedMessage, OverviewMetrics, ResponseTimeMetrics,
    Severity, TimingMetrics,
};
use rapport::{HOUR_MS, MINUTE_MS};

fn balance(count: usize, balanced: usize, user: usize, other: usize, heavy: usize, avg: f64) -> BalanceMetrics {
    BalanceMetrics {
        conversation_count: count,
        balanced,
        user_dominated: user,
        match_dominated: other,
        heavily_imbalanced: heavy,
        average_balance: avg,
    }
}

// =============================================================================
// BALANCE
// =============================================================================

/// 30% heavily imbalanced is a concern, 20% is not
#[test]
fn test_balance_concern_at_thirty_percent_heavy() {
    let insight = generate_balance_insight(&balance(10, 2, 5, 0, 3, 0.3));
    assert_eq!(insight.severity, Severity::Concern);
    assert_eq!(insight.title, "You Often Carry the Conversation");
    assert!(insight.reflection.is_some());

    let below = generate_balance_insight(&balance(10, 2, 5, 0, 2, 0.3));
    assert_eq!(below.severity, Severity::Neutral);
}

/// 70% balanced with a healthy average is positive
#[test]
fn test_balance_positive_and_balanced_framing() {
    let insight = generate_balance_insight(&balance(10, 7, 1, 1, 0, 0.42));
    assert_eq!(insight.severity, Severity::Positive);
    assert_eq!(insight.title, "Balanced Conversations");
}

/// Match-led and mixed datasets pick their own narratives
#[test]
fn test_balance_they_lead_and_mixed() {
    let lead = generate_balance_insight(&balance(10, 3, 1, 5, 1, 0.3));
    assert_eq!(lead.title, "They Often Lead");

    let mixed = generate_balance_insight(&balance(10, 4, 3, 3, 1, 0.35));
    assert_eq!(mixed.title, "A Mix of Dynamics");
    assert_eq!(mixed.severity, Severity::Neutral);
}

/// Same shares give the same insight at any dataset size
#[test]
fn test_balance_is_scale_invariant() {
    let small = generate_balance_insight(&balance(10, 2, 5, 0, 3, 0.3));
    let large = generate_balance_insight(&balance(1000, 200, 500, 0, 300, 0.3));
    assert_eq!(small.severity, large.severity);
    assert_eq!(small.title, large.title);
    assert_eq!(small.summary, large.summary);
}

// =============================================================================
// TIMING
// =============================================================================

fn timing(count: usize, very_fast: usize, fast: usize, moderate: usize, slow: usize, very_slow: usize) -> TimingMetrics {
    TimingMetrics {
        conversation_count: count,
        very_fast,
        fast,
        moderate,
        slow,
        very_slow,
        average_response_time: 3_600_000.0,
    }
}

/// Timing severity and narrative cuts
#[test]
fn test_timing_thresholds() {
    let active = generate_timing_insight(&timing(10, 6, 2, 2, 0, 0));
    assert_eq!(active.severity, Severity::Positive);
    assert_eq!(active.title, "Very Active Conversations");

    let slow = generate_timing_insight(&timing(10, 0, 1, 1, 4, 4));
    assert_eq!(slow.severity, Severity::Concern);
    assert_eq!(slow.title, "Long Gaps Between Replies");

    // exactly 40% slow is not a concern
    let edge = generate_timing_insight(&timing(10, 1, 1, 4, 2, 2));
    assert_eq!(edge.severity, Severity::Neutral);
    assert_eq!(edge.title, "Varied Reply Times");

    let casual = generate_timing_insight(&timing(10, 0, 2, 6, 1, 1));
    assert_eq!(casual.title, "A Casual Pace");
}

// =============================================================================
// LENGTH
// =============================================================================

/// Length severity and narrative cuts
#[test]
fn test_length_thresholds() {
    let brief = generate_length_insight(&LengthMetrics {
        conversation_count: 10,
        very_short: 8,
        short: 2,
        average_length: 3.0,
        ..LengthMetrics::default()
    });
    assert_eq!(brief.title, "Brief Exchanges");
    assert_eq!(brief.severity, Severity::Neutral);

    let deep = generate_length_insight(&LengthMetrics {
        conversation_count: 10,
        short: 3,
        medium: 3,
        long: 2,
        very_long: 2,
        average_length: 70.0,
        ..LengthMetrics::default()
    });
    assert_eq!(deep.title, "Deeper Connections");
    assert_eq!(deep.severity, Severity::Positive);

    let mix = generate_length_insight(&LengthMetrics {
        conversation_count: 10,
        very_short: 3,
        short: 4,
        medium: 3,
        average_length: 15.0,
        ..LengthMetrics::default()
    });
    assert_eq!(mix.title, "A Healthy Mix");
}

/// Exactly 40% user-dominated is not enough for the "you carry" narrative
#[test]
fn test_balance_user_dominated_cut_is_strict() {
    let at = generate_balance_insight(&balance(10, 2, 4, 0, 0, 0.35));
    assert_eq!(at.title, "A Mix of Dynamics");

    let above = generate_balance_insight(&balance(100, 20, 41, 0, 0, 0.35));
    assert_eq!(above.title, "You Often Carry the Conversation");
}

/// Exactly 30% long is neither positive nor "deeper connections"
#[test]
fn test_length_long_cut_is_strict() {
    let at = generate_length_insight(&LengthMetrics {
        conversation_count: 10,
        short: 4,
        medium: 3,
        long: 2,
        very_long: 1,
        average_length: 40.0,
        ..LengthMetrics::default()
    });
    assert_eq!(at.severity, Severity::Neutral);
    assert_eq!(at.title, "A Healthy Mix");

    let above = generate_length_insight(&LengthMetrics {
        conversation_count: 100,
        short: 69,
        long: 31,
        average_length: 40.0,
        ..LengthMetrics::default()
    });
    assert_eq!(above.severity, Severity::Positive);
    assert_eq!(above.title, "Deeper Connections");
}

// =============================================================================
// SUMMARY CUTS
// =============================================================================

fn counted(user: usize, other: usize) -> ConversationMetrics {
    ConversationMetrics {
        match_id: format!("{}-{}", user, other),
        counts: MessageCountMetrics::from_counts(user, other),
        timing: None,
    }
}

fn timed(avg: f64) -> ConversationMetrics {
    ConversationMetrics {
        match_id: format!("{}", avg),
        counts: MessageCountMetrics::from_counts(5, 5),
        timing: Some(ResponseTimeMetrics {
            average_response_time: avg,
            median_response_time: avg,
            fastest_response: avg,
            slowest_response: avg,
            average_user_response: avg,
            average_match_response: avg,
            sample_count: 4,
        }),
    }
}

/// Balanced at 0.4, dominated above 60%, heavily imbalanced below 0.2
#[test]
fn test_balance_summary_cuts() {
    let on_balanced = summarize_balance(&[counted(4, 6)]);
    assert_eq!(on_balanced.balanced, 1);
    assert_eq!(on_balanced.match_dominated, 0);

    let below_balanced = summarize_balance(&[counted(39, 61)]);
    assert_eq!(below_balanced.balanced, 0);
    assert_eq!(below_balanced.match_dominated, 1);
    assert_eq!(below_balanced.heavily_imbalanced, 0);

    let on_heavy = summarize_balance(&[counted(8, 2)]);
    assert_eq!(on_heavy.user_dominated, 1);
    assert_eq!(on_heavy.heavily_imbalanced, 0);

    let below_heavy = summarize_balance(&[counted(81, 19)]);
    assert_eq!(below_heavy.heavily_imbalanced, 1);

    // empty conversations do not count
    let with_empty = summarize_balance(&[counted(0, 0), counted(5, 5)]);
    assert_eq!(with_empty.conversation_count, 1);
    assert_eq!(with_empty.average_balance, 0.5);
}

/// Each timing cut belongs to the slower bucket
#[test]
fn test_timing_summary_cuts() {
    let cases = [
        (5.0 * MINUTE_MS - 1.0, [1, 0, 0, 0, 0]),
        (5.0 * MINUTE_MS, [0, 1, 0, 0, 0]),
        (HOUR_MS - 1.0, [0, 1, 0, 0, 0]),
        (HOUR_MS, [0, 0, 1, 0, 0]),
        (12.0 * HOUR_MS, [0, 0, 0, 1, 0]),
        (48.0 * HOUR_MS, [0, 0, 0, 0, 1]),
    ];
    for (avg, expected) in cases {
        let t = summarize_timing(&[timed(avg)]);
        assert_eq!([t.very_fast, t.fast, t.moderate, t.slow, t.very_slow], expected, "avg={}", avg);
    }

    // conversations without timing are skipped
    assert_eq!(summarize_timing(&[counted(3, 0), timed(HOUR_MS)]).conversation_count, 1);
}

/// Each length cut belongs to the longer bucket
#[test]
fn test_length_summary_cuts() {
    let cases = [
        (4, [1, 0, 0, 0, 0]),
        (5, [0, 1, 0, 0, 0]),
        (19, [0, 1, 0, 0, 0]),
        (20, [0, 0, 1, 0, 0]),
        (50, [0, 0, 0, 1, 0]),
        (99, [0, 0, 0, 1, 0]),
        (100, [0, 0, 0, 0, 1]),
    ];
    for (total, expected) in cases {
        let l = summarize_length(&[counted(total, 0)]);
        assert_eq!([l.very_short, l.short, l.medium, l.long, l.very_long], expected, "total={}", total);
    }
}

// =============================================================================
// ALL INSIGHTS
// =============================================================================

/// No conversations: only the overview
#[test]
fn test_empty_dataset_only_overview() {
    let insights = generate_all_insights(&DatasetMetrics::default());
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].category, InsightCategory::Overview);
    assert_eq!(insights[0].severity, Severity::Neutral);
}

/// Overview, balance, timing, length
#[test]
fn test_fixed_order() {
    let metrics = DatasetMetrics {
        overview: OverviewMetrics {
            total_conversations: 4,
            total_messages: 40,
            user_messages: 20,
            match_messages: 20,
        },
        balance: balance(4, 4, 0, 0, 0, 0.5),
        timing: timing(4, 4, 0, 0, 0, 0),
        length: LengthMetrics {
            conversation_count: 4,
            short: 4,
            average_length: 10.0,
            ..LengthMetrics::default()
        },
    };

    let categories: Vec<_> = generate_all_insights(&metrics).into_iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            InsightCategory::Overview,
            InsightCategory::Balance,
            InsightCategory::Timing,
            InsightCategory::Length
        ]
    );
}

/// Without any reply the timing insight is skipped
#[test]
fn test_no_replies_skips_timing() {
    let base = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    let messages: Vec<_> = (0..3)
        .map(|i| NormalizedMessage::new(format!("{}", i), "sam", "me", base + Duration::hours(i), "hey?", Direction::User))
        .collect();

    let report = analyze_messages(&messages, &PatternClassifier::new());
    let categories: Vec<_> = report.insights.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![InsightCategory::Overview, InsightCategory::Balance, InsightCategory::Length]
    );
}

// =============================================================================
// PATTERN
// =============================================================================

/// Monologue insight is a concern with sanitized examples
#[test]
fn test_pattern_insight_for_monologue() {
    let base = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    let messages: Vec<_> = (0..4)
        .map(|i| {
            NormalizedMessage::new(
                format!("{}", i),
                "sam",
                "me",
                base + Duration::hours(i * 3),
                "Are you free on Saturday for the farmers market?",
                Direction::User,
            )
        })
        .collect();

    let conversation = Conversation::new("sam", messages);
    let metrics = MetricsAggregator::new().conversation_metrics(&conversation);
    let patterns = PatternClassifier::new().classify(&metrics);
    let insight = generate_pattern_insight("sam", &patterns, &conversation.messages);

    assert_eq!(insight.category, InsightCategory::Pattern);
    assert_eq!(insight.severity, Severity::Concern);
    assert_eq!(insight.title, "One-Sided Conversation");
    assert!(insight.summary.contains("One-sided"));
    assert!(insight.summary.contains("4 messages"));

    let examples = insight.examples.unwrap();
    assert_eq!(examples.len(), 3);
    assert_eq!(examples[1].timing.as_deref(), Some("3 hours"));
    for example in &examples {
        assert!(!example.text.contains("farmers"));
    }
}

/// Balanced and fast conversations read as a great connection
#[test]
fn test_pattern_insight_balanced_with_timing() {
    let base = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    let messages: Vec<_> = (0..6)
        .map(|i| {
            let direction = if i % 2 == 0 { Direction::User } else { Direction::Match };
            NormalizedMessage::new(format!("{}", i), "jo", "x", base + Duration::minutes(i * 20), "sounds good", direction)
        })
        .collect();

    let conversation = Conversation::new("jo", messages);
    let metrics = MetricsAggregator::new().conversation_metrics(&conversation);
    let patterns = PatternClassifier::new().classify(&metrics);
    let insight = generate_pattern_insight("jo", &patterns, &conversation.messages);

    assert_eq!(insight.severity, Severity::Positive);
    assert_eq!(insight.title, "A Balanced Connection");
    assert!(insight.summary.contains("great connection"));
    assert!(insight.summary.contains("Average reply time: 20 minutes."));
}

/// Summaries computed from metrics drive the generator
#[test]
fn test_summaries_feed_generator() {
    let base = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    let conversations: Vec<_> = (0..5)
        .map(|c| {
            let messages = (0..10)
                .map(|i| {
                    let direction = if i % 2 == 0 { Direction::User } else { Direction::Match };
                    NormalizedMessage::new(format!("{}-{}", c, i), format!("m{}", c), "x", base + Duration::minutes(i), "ok", direction)
                })
                .collect();
            Conversation::new(format!("m{}", c), messages)
        })
        .collect();

    let metrics = MetricsAggregator::new().all_conversation_metrics(&conversations);
    let insights = generate_all_insights(&summarize(&metrics));
    let balance = insights.iter().find(|i| i.category == InsightCategory::Balance).unwrap();
    let timing = insights.iter().find(|i| i.category == InsightCategory::Timing).unwrap();
    assert_eq!(balance.severity, Severity::Positive);
    assert_eq!(timing.title, "Very Active Conversations");
}

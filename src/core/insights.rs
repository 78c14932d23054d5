//! Insight Generator: dataset summaries → user-facing insights
//!
//! Every threshold is a share of the relevant conversation count, never an
//! absolute count, so the same narrative holds for 5 or 500 conversations.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::core::format::{create_sanitized_examples, format_time_duration};
use crate::core::heuristics::{is_pattern_concerning, pattern_insight};
use crate::types::{
    BalanceMetrics, ConversationPatterns, DatasetMetrics, ImbalancePattern, Insight,
    InsightCategory, LengthMetrics, MetricValue, NormalizedMessage, OverviewMetrics, Severity,
    TimingMetrics,
};
use crate::DEFAULT_MAX_EXAMPLES;

/// Stable id: same category, scope and title always give the same id
fn insight_id(category: InsightCategory, scope: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(category.code().as_bytes());
    hasher.update([0u8]);
    hasher.update(scope.as_bytes());
    hasher.update([0u8]);
    hasher.update(title.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    let hex: String = digest[..6].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", category.code(), hex)
}

fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn build(
    category: InsightCategory,
    scope: &str,
    severity: Severity,
    title: &str,
    summary: String,
    reflection: Option<&str>,
    metrics: BTreeMap<String, MetricValue>,
) -> Insight {
    Insight {
        id: insight_id(category, scope, title),
        category,
        severity,
        title: title.to_string(),
        summary,
        reflection: reflection.map(str::to_string),
        examples: None,
        metrics: Some(metrics),
    }
}

/// Totals across the whole export. Always neutral.
pub fn generate_overview_insight(metrics: &OverviewMetrics) -> Insight {
    let summary = format!(
        "{} across {}, about {:.1} messages per conversation.",
        plural(metrics.total_messages, "message"),
        plural(metrics.total_conversations, "conversation"),
        metrics.average_messages(),
    );

    let mut values = BTreeMap::new();
    values.insert("totalConversations".to_string(), metrics.total_conversations.into());
    values.insert("totalMessages".to_string(), metrics.total_messages.into());
    values.insert("userMessages".to_string(), metrics.user_messages.into());
    values.insert("matchMessages".to_string(), metrics.match_messages.into());
    values.insert("averageMessages".to_string(), metrics.average_messages().into());

    build(
        InsightCategory::Overview,
        "dataset",
        Severity::Neutral,
        "Your Messaging at a Glance",
        summary,
        None,
        values,
    )
}

/// Who carries conversations across the dataset
pub fn generate_balance_insight(metrics: &BalanceMetrics) -> Insight {
    let count = metrics.conversation_count;
    let balanced = share(metrics.balanced, count);
    let user_dominated = share(metrics.user_dominated, count);
    let match_dominated = share(metrics.match_dominated, count);
    let heavy = share(metrics.heavily_imbalanced, count);

    let severity = if heavy >= 0.3 {
        Severity::Concern
    } else if metrics.average_balance >= 0.4 {
        Severity::Positive
    } else {
        Severity::Neutral
    };

    let (title, summary, reflection) = if balanced >= 0.7 {
        (
            "Balanced Conversations",
            format!("{} of your conversations have an even back-and-forth.", percent(balanced)),
            None,
        )
    } else if user_dominated > 0.4 {
        (
            "You Often Carry the Conversation",
            format!("In {} of your conversations you send most of the messages.", percent(user_dominated)),
            Some("What would it look like to leave more room for them to meet you halfway?"),
        )
    } else if match_dominated > 0.4 {
        (
            "They Often Lead",
            format!("In {} of your conversations they send most of the messages.", percent(match_dominated)),
            Some("Are there conversations where you'd like to take more initiative?"),
        )
    } else {
        (
            "A Mix of Dynamics",
            format!(
                "Your conversations vary: {} balanced, {} led by you, {} led by them.",
                percent(balanced),
                percent(user_dominated),
                percent(match_dominated)
            ),
            None,
        )
    };

    let mut values = BTreeMap::new();
    values.insert("conversations".to_string(), count.into());
    values.insert("balancedShare".to_string(), balanced.into());
    values.insert("userDominatedShare".to_string(), user_dominated.into());
    values.insert("matchDominatedShare".to_string(), match_dominated.into());
    values.insert("heavilyImbalancedShare".to_string(), heavy.into());
    values.insert("averageBalance".to_string(), metrics.average_balance.into());

    build(InsightCategory::Balance, "dataset", severity, title, summary, reflection, values)
}

/// How quickly replies come across the dataset
pub fn generate_timing_insight(metrics: &TimingMetrics) -> Insight {
    let count = metrics.conversation_count;
    let very_fast = share(metrics.very_fast, count);
    let quick = share(metrics.very_fast + metrics.fast, count);
    let moderate = share(metrics.moderate, count);
    let slow = share(metrics.slow + metrics.very_slow, count);
    let typical = format_time_duration(metrics.average_response_time.max(0.0) as u64);

    let severity = if slow > 0.4 {
        Severity::Concern
    } else if quick > 0.5 {
        Severity::Positive
    } else {
        Severity::Neutral
    };

    let (title, summary, reflection) = if very_fast > 0.5 {
        (
            "Very Active Conversations",
            format!("{} of your conversations move within minutes.", percent(very_fast)),
            None,
        )
    } else if slow > 0.5 {
        (
            "Long Gaps Between Replies",
            format!("{} of your conversations have replies taking half a day or more.", percent(slow)),
            Some("Do the long gaps reflect your schedule, or your interest?"),
        )
    } else if moderate > 0.5 {
        (
            "A Casual Pace",
            format!("Most of your conversations ({}) unfold over hours rather than minutes.", percent(moderate)),
            None,
        )
    } else {
        (
            "Varied Reply Times",
            format!("Reply times vary across your conversations, averaging {}.", typical),
            None,
        )
    };

    let mut values = BTreeMap::new();
    values.insert("conversations".to_string(), count.into());
    values.insert("fastShare".to_string(), quick.into());
    values.insert("moderateShare".to_string(), moderate.into());
    values.insert("slowShare".to_string(), slow.into());
    values.insert("averageResponse".to_string(), typical.into());

    build(InsightCategory::Timing, "dataset", severity, title, summary, reflection, values)
}

/// How long conversations run across the dataset
pub fn generate_length_insight(metrics: &LengthMetrics) -> Insight {
    let count = metrics.conversation_count;
    let very_short = share(metrics.very_short, count);
    let long = share(metrics.long + metrics.very_long, count);

    let severity = if long > 0.3 {
        Severity::Positive
    } else {
        Severity::Neutral
    };

    let (title, summary, reflection) = if very_short > 0.7 {
        (
            "Brief Exchanges",
            format!("{} of your conversations end within a handful of messages.", percent(very_short)),
            Some("What tends to happen right before a conversation fizzles out?"),
        )
    } else if long > 0.3 {
        (
            "Deeper Connections",
            format!("{} of your conversations run past 50 messages.", percent(long)),
            None,
        )
    } else {
        (
            "A Healthy Mix",
            format!(
                "Your conversations range from quick chats to longer threads, averaging {:.0} messages.",
                metrics.average_length
            ),
            None,
        )
    };

    let mut values = BTreeMap::new();
    values.insert("conversations".to_string(), count.into());
    values.insert("veryShortShare".to_string(), very_short.into());
    values.insert("longShare".to_string(), long.into());
    values.insert("averageLength".to_string(), metrics.average_length.into());

    build(InsightCategory::Length, "dataset", severity, title, summary, reflection, values)
}

/// Insight for a single conversation's pattern pair
pub fn generate_pattern_insight(
    match_id: &str,
    patterns: &ConversationPatterns,
    messages: &[NormalizedMessage],
) -> Insight {
    let concerning = is_pattern_concerning(patterns);
    let imbalance = patterns.imbalance.pattern;

    let severity = if concerning {
        Severity::Concern
    } else if imbalance == ImbalancePattern::Balanced {
        Severity::Positive
    } else {
        Severity::Neutral
    };

    let title = if imbalance == ImbalancePattern::Monologue {
        "One-Sided Conversation"
    } else if concerning {
        "An Uneven Dynamic"
    } else if imbalance == ImbalancePattern::Balanced {
        "A Balanced Connection"
    } else {
        "A Mixed Dynamic"
    };

    let mut summary = format!(
        "{} {} exchanged.",
        pattern_insight(patterns),
        plural(patterns.imbalance.indicators.total, "message")
    );
    if let Some(timing) = &patterns.timing {
        let avg = timing.indicators.average_response_time.max(0.0) as u64;
        summary.push_str(&format!(" Average reply time: {}.", format_time_duration(avg)));
    }

    let mut values = BTreeMap::new();
    values.insert("imbalance".to_string(), imbalance.label().into());
    values.insert("imbalanceConfidence".to_string(), patterns.imbalance.confidence.into());
    if let Some(timing) = &patterns.timing {
        values.insert("timing".to_string(), timing.pattern.label().into());
        values.insert("timingConfidence".to_string(), timing.confidence.into());
    }

    let reflection = concerning.then_some("Is the energy you put into this conversation coming back to you?");
    let mut insight = build(InsightCategory::Pattern, match_id, severity, title, summary, reflection, values);

    let examples = create_sanitized_examples(messages, DEFAULT_MAX_EXAMPLES);
    if !examples.is_empty() {
        insight.examples = Some(examples);
    }
    insight
}

/// Overview always; balance, timing and length only when they have data.
/// Order: overview, balance, timing, length.
pub fn generate_all_insights(metrics: &DatasetMetrics) -> Vec<Insight> {
    let mut insights = vec![generate_overview_insight(&metrics.overview)];

    if metrics.balance.conversation_count > 0 {
        insights.push(generate_balance_insight(&metrics.balance));
    }
    if metrics.timing.conversation_count > 0 {
        insights.push(generate_timing_insight(&metrics.timing));
    }
    if metrics.length.conversation_count > 0 {
        insights.push(generate_length_insight(&metrics.length));
    }

    insights
}

// =============================================================================
// TESTS
// =============================================================================

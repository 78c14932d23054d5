//! Pattern Classifier: fixed thresholds over aggregated metrics
//!
//! Imbalance buckets by balance (0.0 one-sided → 0.5 even):
//! - balance == 0            → Monologue (confidence 1.0)
//! - balance >= 0.45         → Balanced
//! - balance >= 0.30         → SlightUserHeavy / SlightMatchHeavy
//! - otherwise               → UserDominated / MatchDominated
//!
//! Timing buckets by average response time: 5 min / 2 h / 12 h / 48 h / 7 d.
//! Timing confidence is dampened by min(1, samples / 10).

use crate::config::Thresholds;
use crate::core::format::format_time_duration;
use crate::types::{
    ConversationMetrics, ConversationPatterns, ImbalanceClassification, ImbalancePattern,
    MessageCountMetrics, ResponseTimeMetrics, TimingClassification, TimingPattern,
};

/// Rule-based classifier
#[derive(Debug, Clone, Default)]
pub struct PatternClassifier {
    thresholds: Thresholds,
}

impl PatternClassifier {
    /// Create classifier with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create classifier with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Classify who carries the conversation
    pub fn recognize_imbalance_pattern(&self, metrics: &MessageCountMetrics) -> ImbalanceClassification {
        let t = &self.thresholds;
        let balance = metrics.balance;
        let user_leads = metrics.user_ratio > metrics.match_ratio;

        let (pattern, confidence, description) = if balance <= 0.0 {
            let description = if metrics.total == 0 {
                "One-sided conversation: no messages have been exchanged yet".to_string()
            } else if metrics.match_messages == 0 {
                "One-sided conversation: only you are sending messages".to_string()
            } else {
                "One-sided conversation: only they are sending messages".to_string()
            };
            (ImbalancePattern::Monologue, 1.0, description)
        } else if balance >= t.balance_balanced {
            let span = 0.5 - t.balance_balanced;
            let confidence = if span > 0.0 {
                0.8 + 0.2 * (balance - t.balance_balanced) / span
            } else {
                1.0
            };
            (
                ImbalancePattern::Balanced,
                confidence,
                "You both contribute evenly to the conversation".to_string(),
            )
        } else if balance >= t.balance_slight {
            let span = t.balance_balanced - t.balance_slight;
            let confidence = 0.6 + 0.2 * (balance - t.balance_slight) / span;
            if user_leads {
                (
                    ImbalancePattern::SlightUserHeavy,
                    confidence,
                    format!(
                        "You send a bit more than they do ({:.0}% of messages)",
                        metrics.user_ratio * 100.0
                    ),
                )
            } else {
                (
                    ImbalancePattern::SlightMatchHeavy,
                    confidence,
                    format!(
                        "They send a bit more than you do ({:.0}% of messages)",
                        metrics.match_ratio * 100.0
                    ),
                )
            }
        } else {
            let confidence = 0.7 + 0.3 * (t.balance_slight - balance) / t.balance_slight;
            if user_leads {
                (
                    ImbalancePattern::UserDominated,
                    confidence,
                    format!(
                        "You are carrying most of this conversation ({:.0}% of messages)",
                        metrics.user_ratio * 100.0
                    ),
                )
            } else {
                (
                    ImbalancePattern::MatchDominated,
                    confidence,
                    format!(
                        "They are carrying most of this conversation ({:.0}% of messages), a sign of strong interest",
                        metrics.match_ratio * 100.0
                    ),
                )
            }
        };

        ImbalanceClassification {
            pattern,
            confidence: confidence.clamp(0.0, 1.0),
            description,
            indicators: *metrics,
        }
    }

    /// Classify reply speed
    pub fn recognize_timing_pattern(&self, metrics: &ResponseTimeMetrics) -> TimingClassification {
        let t = &self.thresholds;
        let avg = metrics.average_response_time;

        let bounds = [
            0.0,
            t.timing_instant_ms,
            t.timing_active_ms,
            t.timing_casual_ms,
            t.timing_slow_burn_ms,
            t.timing_sporadic_ms,
        ];
        let last = bounds.len() - 1;
        let bucket = bounds[1..]
            .iter()
            .position(|upper| avg < *upper)
            .unwrap_or(last);

        let depth = if bucket == 0 {
            (bounds[1] - avg) / bounds[1]
        } else if bucket == last {
            (avg - bounds[last]) / bounds[last]
        } else {
            let (lower, upper) = (bounds[bucket], bounds[bucket + 1]);
            let half = (upper - lower) / 2.0;
            (avg - lower).min(upper - avg) / half
        };
        let base = 0.6 + 0.4 * depth.clamp(0.0, 1.0);

        let dampening = if t.full_confidence_samples == 0 {
            1.0
        } else {
            (metrics.sample_count as f64 / t.full_confidence_samples as f64).min(1.0)
        };

        let pattern = TimingPattern::ALL[bucket];
        let typical = format_time_duration(avg.max(0.0) as u64);
        let description = match pattern {
            TimingPattern::InstantMessaging => {
                format!("Replies fly back and forth, typically within {}", typical)
            }
            TimingPattern::ActiveConversation => {
                format!("An active back-and-forth, replies usually within {}", typical)
            }
            TimingPattern::CasualChat => {
                format!("A relaxed pace, replies usually within {}", typical)
            }
            TimingPattern::SlowBurn => format!("A slow burn, replies take around {}", typical),
            TimingPattern::Sporadic => {
                format!("Sporadic contact, replies take around {}", typical)
            }
            TimingPattern::Ghosting => {
                format!("Long silences between replies, around {} on average", typical)
            }
        };

        TimingClassification {
            pattern,
            confidence: (base * dampening).clamp(0.0, 1.0),
            description,
            indicators: *metrics,
        }
    }

    /// Compose both classifications. Timing is absent without timing metrics.
    pub fn recognize_conversation_patterns(
        &self,
        message_metrics: &MessageCountMetrics,
        timing_metrics: Option<&ResponseTimeMetrics>,
    ) -> ConversationPatterns {
        ConversationPatterns {
            imbalance: self.recognize_imbalance_pattern(message_metrics),
            timing: timing_metrics.map(|m| self.recognize_timing_pattern(m)),
        }
    }

    /// Classify an aggregated conversation
    pub fn classify(&self, metrics: &ConversationMetrics) -> ConversationPatterns {
        self.recognize_conversation_patterns(&metrics.counts, metrics.timing.as_ref())
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Pattern labels and classification results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{MessageCountMetrics, ResponseTimeMetrics};

/// Who carries the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalancePattern {
    Balanced,
    SlightUserHeavy,
    SlightMatchHeavy,
    UserDominated,
    MatchDominated,
    /// One side never wrote back
    Monologue,
}

impl ImbalancePattern {
    /// Every variant, in declaration order
    pub const ALL: [ImbalancePattern; 6] = [
        Self::Balanced,
        Self::SlightUserHeavy,
        Self::SlightMatchHeavy,
        Self::UserDominated,
        Self::MatchDominated,
        Self::Monologue,
    ];

    /// Wire tag (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::SlightUserHeavy => "slight_user_heavy",
            Self::SlightMatchHeavy => "slight_match_heavy",
            Self::UserDominated => "user_dominated",
            Self::MatchDominated => "match_dominated",
            Self::Monologue => "monologue",
        }
    }

    /// Short display string
    pub fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::SlightUserHeavy => "Slightly You-Led",
            Self::SlightMatchHeavy => "Slightly Them-Led",
            Self::UserDominated => "You-Driven",
            Self::MatchDominated => "Them-Driven",
            Self::Monologue => "One-Sided",
        }
    }
}

impl std::fmt::Display for ImbalancePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How quickly replies come
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingPattern {
    InstantMessaging,
    ActiveConversation,
    CasualChat,
    SlowBurn,
    Sporadic,
    Ghosting,
}

impl TimingPattern {
    /// Every variant, in declaration order
    pub const ALL: [TimingPattern; 6] = [
        Self::InstantMessaging,
        Self::ActiveConversation,
        Self::CasualChat,
        Self::SlowBurn,
        Self::Sporadic,
        Self::Ghosting,
    ];

    /// Wire tag (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::InstantMessaging => "instant_messaging",
            Self::ActiveConversation => "active_conversation",
            Self::CasualChat => "casual_chat",
            Self::SlowBurn => "slow_burn",
            Self::Sporadic => "sporadic",
            Self::Ghosting => "ghosting",
        }
    }

    /// Short display string
    pub fn label(&self) -> &'static str {
        match self {
            Self::InstantMessaging => "Rapid-Fire",
            Self::ActiveConversation => "Engaged",
            Self::CasualChat => "Relaxed",
            Self::SlowBurn => "Slow Burn",
            Self::Sporadic => "Sporadic",
            Self::Ghosting => "Distant",
        }
    }

    /// Replies land within a couple of hours
    pub fn is_fast(&self) -> bool {
        matches!(self, Self::InstantMessaging | Self::ActiveConversation)
    }
}

impl std::fmt::Display for TimingPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Imbalance label with confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceClassification {
    pub pattern: ImbalancePattern,
    /// 0.0-1.0
    pub confidence: f64,
    pub description: String,
    pub indicators: MessageCountMetrics,
}

/// Timing label with confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingClassification {
    pub pattern: TimingPattern,
    /// 0.0-1.0, dampened when few response gaps were observed
    pub confidence: f64,
    pub description: String,
    pub indicators: ResponseTimeMetrics,
}

/// Both classifications for one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPatterns {
    pub imbalance: ImbalanceClassification,
    /// None when no response gaps exist
    pub timing: Option<TimingClassification>,
}

/// Distribution of labels over many conversations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPatternAnalysis {
    pub total_conversations: usize,
    pub imbalance_distribution: BTreeMap<ImbalancePattern, usize>,
    pub timing_distribution: BTreeMap<TimingPattern, usize>,
    /// None only for an empty batch
    pub most_common_imbalance: Option<ImbalancePattern>,
    pub most_common_timing: Option<TimingPattern>,
}

// =============================================================================
// TESTS
// =============================================================================

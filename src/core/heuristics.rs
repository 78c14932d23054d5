//! Concern and narrative heuristics over a classified pattern pair

use crate::types::{ConversationPatterns, ImbalancePattern, TimingPattern};

/// Whether a conversation's patterns deserve a closer look
pub fn is_pattern_concerning(patterns: &ConversationPatterns) -> bool {
    let imbalance = match patterns.imbalance.pattern {
        ImbalancePattern::Monologue
        | ImbalancePattern::UserDominated
        | ImbalancePattern::MatchDominated => true,
        ImbalancePattern::Balanced
        | ImbalancePattern::SlightUserHeavy
        | ImbalancePattern::SlightMatchHeavy => false,
    };

    let timing = patterns.timing.as_ref().is_some_and(|t| match t.pattern {
        TimingPattern::Ghosting => true,
        TimingPattern::InstantMessaging
        | TimingPattern::ActiveConversation
        | TimingPattern::CasualChat
        | TimingPattern::SlowBurn
        | TimingPattern::Sporadic => false,
    });

    imbalance || timing
}

/// One narrative sentence for the pattern pair
pub fn pattern_insight(patterns: &ConversationPatterns) -> String {
    let timing = patterns.timing.as_ref().map(|t| t.pattern);

    match patterns.imbalance.pattern {
        ImbalancePattern::Monologue => patterns.imbalance.description.clone(),
        ImbalancePattern::UserDominated => {
            "You're putting in more effort here than they are.".to_string()
        }
        ImbalancePattern::MatchDominated => {
            "They seem more engaged in this conversation than you are.".to_string()
        }
        _ if timing == Some(TimingPattern::Ghosting) => {
            "Long silences stretch between replies in this conversation.".to_string()
        }
        ImbalancePattern::Balanced if timing.is_some_and(|t| t.is_fast()) => {
            "Balanced effort and quick replies: signs of a great connection.".to_string()
        }
        ImbalancePattern::Balanced => {
            "You both contribute evenly to this conversation.".to_string()
        }
        ImbalancePattern::SlightUserHeavy => {
            "Fairly even, with you leaning in a little more.".to_string()
        }
        ImbalancePattern::SlightMatchHeavy => {
            "Fairly even, with them leaning in a little more.".to_string()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

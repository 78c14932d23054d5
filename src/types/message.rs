//! Normalized message model
//!
//! Messages arrive already parsed from an app export. They are never mutated;
//! every component reads them through shared slices.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the conversation sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The person whose export this is
    User,
    /// The counterpart
    Match,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::User => "User",
            Direction::Match => "Match",
        };
        write!(f, "{}", name)
    }
}

/// A single message as produced by the export parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMessage {
    pub id: String,
    pub match_id: String,
    pub sender_id: String,
    pub sent_at: DateTime<Utc>,
    pub body: String,
    pub direction: Direction,
}

impl NormalizedMessage {
    /// Create a new message
    pub fn new(
        id: impl Into<String>,
        match_id: impl Into<String>,
        sender_id: impl Into<String>,
        sent_at: DateTime<Utc>,
        body: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            id: id.into(),
            match_id: match_id.into(),
            sender_id: sender_id.into(),
            sent_at,
            body: body.into(),
            direction,
        }
    }
}

/// All messages exchanged with one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub match_id: String,
    pub messages: Vec<NormalizedMessage>,
}

impl Conversation {
    /// Create a conversation from its messages
    pub fn new(match_id: impl Into<String>, messages: Vec<NormalizedMessage>) -> Self {
        Self {
            match_id: match_id.into(),
            messages,
        }
    }

    /// Group a flat message list by match id, ordered by match id
    pub fn group_by_match(messages: &[NormalizedMessage]) -> Vec<Conversation> {
        let mut groups: BTreeMap<&str, Vec<NormalizedMessage>> = BTreeMap::new();

        for message in messages {
            groups
                .entry(message.match_id.as_str())
                .or_default()
                .push(message.clone());
        }

        groups
            .into_iter()
            .map(|(match_id, messages)| Conversation::new(match_id, messages))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

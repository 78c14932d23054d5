//! Types for the LLM pattern recognizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::NormalizedMessage;

/// A person appearing in the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Unit of work submitted to the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerInput {
    pub messages: Vec<NormalizedMessage>,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub user_id: String,
}

/// How stable the user's style is across the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    Consistent,
    Mixed,
    Inconsistent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStyle {
    /// e.g. "direct", "playful", "reserved"
    pub primary: String,
    pub consistency: Consistency,
    #[serde(default)]
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMarkers {
    #[serde(default)]
    pub secure_markers: Vec<String>,
    #[serde(default)]
    pub anxiety_markers: Vec<String>,
    #[serde(default)]
    pub avoidance_markers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticity {
    /// 0.0-1.0
    pub score: f64,
    #[serde(default)]
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundaries {
    pub healthy: bool,
    #[serde(default)]
    pub observations: Vec<String>,
}

/// JSON object the model is asked to return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAnalysis {
    pub communication_style: CommunicationStyle,
    pub attachment_markers: AttachmentMarkers,
    pub authenticity: Authenticity,
    pub boundaries: Boundaries,
    pub complexity_score: f64,
    pub summary: String,
}

/// Which analyzer produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyzerKind {
    #[serde(rename = "pattern-recognizer")]
    PatternRecognizer,
}

/// Cost and latency of one recognizer call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizerMetadata {
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub model: String,
    pub tokens_used: u64,
    pub cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecognizerResult {
    pub analyzer: AnalyzerKind,
    pub communication_style: CommunicationStyle,
    pub attachment_markers: AttachmentMarkers,
    pub authenticity: Authenticity,
    pub boundaries: Boundaries,
    /// Clamped to 0.0-1.0
    pub complexity_score: f64,
    pub summary: String,
    pub escalate_to_attachment_evaluator: bool,
    pub metadata: RecognizerMetadata,
}

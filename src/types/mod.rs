//! Core types for Rapport

mod insight;
mod message;
mod metrics;
mod pattern;
mod recognizer;
mod summary;

pub use insight::{ExampleSender, Insight, InsightCategory, MetricValue, SanitizedExample, Severity};
pub use message::{Conversation, Direction, NormalizedMessage};
pub use metrics::{ConversationMetrics, MessageCountMetrics, ResponseTimeMetrics};
pub use pattern::{
    BatchPatternAnalysis, ConversationPatterns, ImbalanceClassification, ImbalancePattern,
    TimingClassification, TimingPattern,
};
pub use recognizer::{
    AnalyzerInput, AnalyzerKind, AttachmentMarkers, Authenticity, Boundaries, CommunicationStyle,
    Consistency, ModelAnalysis, Participant, PatternRecognizerResult, RecognizerMetadata,
};
pub use summary::{BalanceMetrics, DatasetMetrics, LengthMetrics, OverviewMetrics, TimingMetrics};

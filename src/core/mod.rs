//! Core modules for Rapport

pub mod api;
pub mod batch;
pub mod classifier;
pub mod format;
pub mod heuristics;
pub mod insights;
pub mod llm;
pub mod metrics;
pub mod pricing;
pub mod recognizer;
pub mod report;
pub mod summary;

pub use api::{create_router, run_server};
pub use batch::BatchAnalyzer;
pub use classifier::PatternClassifier;
pub use format::{create_sanitized_examples, format_time_duration, sanitize_message_text};
pub use heuristics::{is_pattern_concerning, pattern_insight};
pub use insights::{
    generate_all_insights, generate_balance_insight, generate_length_insight,
    generate_overview_insight, generate_pattern_insight, generate_timing_insight,
};
pub use llm::{ChatCompletion, ChatRequest, ChatResponse, LlmError, OpenAiClient};
pub use metrics::MetricsAggregator;
pub use pricing::PricingTable;
pub use recognizer::{
    filter_recent_messages, sample_messages, should_escalate_to_attachment_evaluator,
    PatternRecognizer, RecognizerError,
};
pub use report::{analyze_messages, AnalysisReport, ConversationReport};
pub use summary::summarize;

//! End-to-end rule-based analysis of a flat message list
//!
//! messages → conversations → metrics → patterns → batch + insights

use serde::{Deserialize, Serialize};

use crate::core::insights::{generate_all_insights, generate_pattern_insight};
use crate::core::summary::summarize;
use crate::core::{BatchAnalyzer, MetricsAggregator, PatternClassifier};
use crate::types::{
    BatchPatternAnalysis, Conversation, ConversationMetrics, ConversationPatterns, Insight,
    NormalizedMessage,
};

/// Everything known about one conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReport {
    pub match_id: String,
    pub metrics: ConversationMetrics,
    pub patterns: ConversationPatterns,
    pub insight: Insight,
}

/// Full rule-based analysis of an export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub conversations: Vec<ConversationReport>,
    pub batch: BatchPatternAnalysis,
    pub insights: Vec<Insight>,
}

/// Run every rule-based stage over `messages`
pub fn analyze_messages(messages: &[NormalizedMessage], classifier: &PatternClassifier) -> AnalysisReport {
    let aggregator = MetricsAggregator::new();
    let conversations = Conversation::group_by_match(messages);
    let metrics = aggregator.all_conversation_metrics(&conversations);

    let analyzer = BatchAnalyzer::with_classifier(classifier.clone());
    let patterns = analyzer.classify_all(&metrics);
    let batch = analyzer.tally_patterns(&patterns);
    let insights = generate_all_insights(&summarize(&metrics));

    let conversations = conversations
        .iter()
        .zip(metrics)
        .zip(patterns)
        .map(|((conversation, metrics), patterns)| {
            let insight = generate_pattern_insight(&conversation.match_id, &patterns, &conversation.messages);
            ConversationReport {
                match_id: conversation.match_id.clone(),
                metrics,
                patterns,
                insight,
            }
        })
        .collect();

    tracing::info!(
        messages = messages.len(),
        conversations = batch.total_conversations,
        insights = insights.len(),
        "analysis complete"
    );

    AnalysisReport {
        conversations,
        batch,
        insights,
    }
}

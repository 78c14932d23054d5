//! Batch Pattern Analyzer: label distributions across conversations
//!
//! Conversations are classified independently. Ties for the most common label
//! go to the label seen first in input order.

use std::collections::BTreeMap;

use crate::core::PatternClassifier;
use crate::types::{BatchPatternAnalysis, ConversationMetrics, ConversationPatterns};

/// Runs the classifier over many conversations
#[derive(Debug, Clone, Default)]
pub struct BatchAnalyzer {
    classifier: PatternClassifier,
}

impl BatchAnalyzer {
    /// Create analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create analyzer around an existing classifier
    pub fn with_classifier(classifier: PatternClassifier) -> Self {
        Self { classifier }
    }

    /// Classify every conversation, preserving input order
    pub fn classify_all(&self, conversations: &[ConversationMetrics]) -> Vec<ConversationPatterns> {
        conversations.iter().map(|c| self.classifier.classify(c)).collect()
    }

    /// Distributions and modal labels
    pub fn analyze_batch_patterns(&self, conversations: &[ConversationMetrics]) -> BatchPatternAnalysis {
        self.tally_patterns(&self.classify_all(conversations))
    }

    /// Distributions and modal labels over already classified conversations
    pub fn tally_patterns(&self, patterns: &[ConversationPatterns]) -> BatchPatternAnalysis {
        let analysis = BatchPatternAnalysis {
            total_conversations: patterns.len(),
            imbalance_distribution: tally(patterns.iter().map(|p| p.imbalance.pattern)),
            timing_distribution: tally(patterns.iter().filter_map(|p| p.timing.as_ref().map(|t| t.pattern))),
            most_common_imbalance: mode(patterns.iter().map(|p| p.imbalance.pattern)),
            most_common_timing: mode(patterns.iter().filter_map(|p| p.timing.as_ref().map(|t| t.pattern))),
        };

        tracing::debug!(
            conversations = analysis.total_conversations,
            with_timing = analysis.timing_distribution.values().sum::<usize>(),
            most_common_imbalance = ?analysis.most_common_imbalance,
            most_common_timing = ?analysis.most_common_timing,
            "batch patterns analyzed"
        );

        analysis
    }
}

fn tally<T: Ord>(labels: impl Iterator<Item = T>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Most frequent label; ties go to the first one encountered
fn mode<T: Copy + PartialEq>(labels: impl Iterator<Item = T>) -> Option<T> {
    // (label, count) in order of first encounter
    let mut seen: Vec<(T, usize)> = Vec::new();
    for label in labels {
        match seen.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => seen.push((label, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (label, count) in seen {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

// =============================================================================
// TESTS
// =============================================================================

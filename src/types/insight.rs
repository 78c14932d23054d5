//! User-facing insight records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Balance,
    Timing,
    Length,
    Pattern,
    Overview,
}

impl InsightCategory {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Timing => "timing",
            Self::Length => "length",
            Self::Pattern => "pattern",
            Self::Overview => "overview",
        }
    }
}

/// How an insight should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Neutral,
    /// Worth a second look
    Concern,
}

impl Severity {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Severity::Positive => "\x1b[32m", // Green
            Severity::Neutral => "\x1b[90m",  // Gray
            Severity::Concern => "\x1b[33m",  // Orange/Yellow
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for severity
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Positive => "🟢",
            Severity::Neutral => "⚪",
            Severity::Concern => "🟠",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Positive => "POSITIVE",
            Severity::Neutral => "NEUTRAL",
            Severity::Concern => "CONCERN",
        };
        write!(f, "{}", name)
    }
}

/// Side shown on a sanitized example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleSender {
    You,
    Them,
}

/// A message rendered as a placeholder, never the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedExample {
    pub text: String,
    pub sender: ExampleSender,
    /// Gap since the previous example, e.g. "3 hours"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

/// Number or text attached to an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Number(v as f64)
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

/// One user-facing finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub category: InsightCategory,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<SanitizedExample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, MetricValue>>,
}

impl Insight {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{}{} [{}] {}{}\n   {}",
            self.severity.color_code(),
            self.severity.emoji(),
            self.category.code(),
            self.title,
            Severity::color_reset(),
            self.summary,
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "category={} | severity={} | title={} | summary={}",
            self.category.code(),
            self.severity,
            self.title,
            self.summary,
        )
    }
}

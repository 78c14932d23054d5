//! LLM Pattern Recognizer & escalation decision
//!
//! Windows the message history to the trailing 90 days, caps the transcript,
//! asks the model for a structured read, and decides whether the deeper
//! attachment evaluator should run.
//!
//! Escalate when ANY of:
//! - complexity score > 0.3
//! - communication style consistency is mixed or inconsistent
//! - both anxiety and avoidance markers are present

use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::config::Config;
use crate::core::llm::{ChatCompletion, ChatMessage, ChatRequest, LlmError, ResponseFormat};
use crate::core::pricing::PricingTable;
use crate::types::{
    AnalyzerInput, AnalyzerKind, AttachmentMarkers, CommunicationStyle, Consistency,
    ModelAnalysis, NormalizedMessage, PatternRecognizerResult, RecognizerMetadata,
};
use crate::{DEFAULT_MAX_MESSAGES, ESCALATION_COMPLEXITY, RECENCY_WINDOW_DAYS};

const SYSTEM_PROMPT: &str = r#"You analyze dating-app conversations for communication patterns. You describe patterns; you do not diagnose.
Lines are formatted "[date] Sender: text" where "User" is the person requesting the analysis and "Match" is the counterpart.
Respond with a single JSON object with exactly these keys:
{
  "communicationStyle": {"primary": string, "consistency": "consistent" | "mixed" | "inconsistent", "traits": [string]},
  "attachmentMarkers": {"secureMarkers": [string], "anxietyMarkers": [string], "avoidanceMarkers": [string]},
  "authenticity": {"score": number between 0 and 1, "signals": [string]},
  "boundaries": {"healthy": boolean, "observations": [string]},
  "complexityScore": number between 0 and 1,
  "summary": string
}
Markers describe the User's messages only. Use empty arrays when nothing applies."#;

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model response is not the expected JSON shape: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Messages sent within the trailing 90 days of `now`
pub fn filter_recent_messages(input: &AnalyzerInput, now: DateTime<Utc>) -> Vec<&NormalizedMessage> {
    filter_messages_within(input, now, RECENCY_WINDOW_DAYS)
}

/// Messages sent within the trailing `days` of `now`, inclusive at both ends.
/// A window too large to represent keeps everything up to `now`.
pub fn filter_messages_within(
    input: &AnalyzerInput,
    now: DateTime<Utc>,
    days: i64,
) -> Vec<&NormalizedMessage> {
    let cutoff = TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    input
        .messages
        .iter()
        .filter(|m| m.sent_at >= cutoff && m.sent_at <= now)
        .collect()
}

/// "[YYYY-MM-DD] User: body"
pub fn format_transcript_line(message: &NormalizedMessage) -> String {
    format!(
        "[{}] {}: {}",
        message.sent_at.format("%Y-%m-%d"),
        message.direction,
        message.body
    )
}

/// Recent messages as transcript lines, oldest first, at most `max_messages`
pub fn sample_messages(input: &AnalyzerInput, max_messages: usize, now: DateTime<Utc>) -> Vec<String> {
    sample_messages_within(input, max_messages, now, RECENCY_WINDOW_DAYS)
}

pub fn sample_messages_within(
    input: &AnalyzerInput,
    max_messages: usize,
    now: DateTime<Utc>,
    days: i64,
) -> Vec<String> {
    let mut recent = filter_messages_within(input, now, days);
    recent.sort_by_key(|m| m.sent_at);
    recent
        .into_iter()
        .take(max_messages)
        .map(format_transcript_line)
        .collect()
}

/// Escalation decision with the default complexity cut
pub fn should_escalate_to_attachment_evaluator(
    complexity_score: f64,
    style: &CommunicationStyle,
    markers: &AttachmentMarkers,
) -> bool {
    escalation_decision(complexity_score, style, markers, ESCALATION_COMPLEXITY)
}

pub fn escalation_decision(
    complexity_score: f64,
    style: &CommunicationStyle,
    markers: &AttachmentMarkers,
    complexity_threshold: f64,
) -> bool {
    let complex = complexity_score > complexity_threshold;
    let unstable = match style.consistency {
        Consistency::Mixed | Consistency::Inconsistent => true,
        Consistency::Consistent => false,
    };
    let conflicted = !markers.anxiety_markers.is_empty() && !markers.avoidance_markers.is_empty();

    complex || unstable || conflicted
}

/// Runs one model call per input
pub struct PatternRecognizer<C> {
    client: C,
    pricing: PricingTable,
    model: String,
    max_messages: usize,
    recency_days: i64,
    escalation_complexity: f64,
}

impl<C: ChatCompletion> PatternRecognizer<C> {
    /// Recognizer with default limits
    pub fn new(client: C, pricing: PricingTable, model: impl Into<String>) -> Self {
        Self {
            client,
            pricing,
            model: model.into(),
            max_messages: DEFAULT_MAX_MESSAGES,
            recency_days: RECENCY_WINDOW_DAYS,
            escalation_complexity: ESCALATION_COMPLEXITY,
        }
    }

    /// Recognizer configured from `[llm]`, `[thresholds]` and `[pricing]`
    pub fn from_config(client: C, config: &Config) -> Self {
        Self {
            client,
            pricing: PricingTable::builtin().merged(&config.pricing),
            model: config.llm.model.clone(),
            max_messages: config.llm.max_messages,
            recency_days: config.llm.recency_days,
            escalation_complexity: config.thresholds.escalation_complexity,
        }
    }

    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Build the request sent for `input`
    pub fn build_request(&self, input: &AnalyzerInput, now: DateTime<Utc>) -> ChatRequest {
        let lines = sample_messages_within(input, self.max_messages, now, self.recency_days);
        let transcript = if lines.is_empty() {
            format!("(no messages in the last {} days)", self.recency_days)
        } else {
            lines.join("\n")
        };

        let content = format!(
            "Conversation transcript ({} messages from the last {} days):\n{}",
            lines.len(),
            self.recency_days,
            transcript
        );

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(content)],
            response_format: ResponseFormat::json_object(),
        }
    }

    /// One model call. Failures propagate to the caller without retry.
    pub async fn run(
        &self,
        input: &AnalyzerInput,
        now: DateTime<Utc>,
    ) -> Result<PatternRecognizerResult, RecognizerError> {
        let started = Instant::now();
        let request = self.build_request(input, now);

        tracing::info!(
            user_id = %input.user_id,
            matches = input.matches.len(),
            model = %self.model,
            "running pattern recognizer"
        );

        let response = self.client.complete(request).await?;
        let analysis: ModelAnalysis = serde_json::from_str(response.content()?)?;

        let complexity_score = analysis.complexity_score.clamp(0.0, 1.0);
        let escalate = escalation_decision(
            complexity_score,
            &analysis.communication_style,
            &analysis.attachment_markers,
            self.escalation_complexity,
        );

        let model = if response.model.is_empty() {
            self.model.clone()
        } else {
            response.model.clone()
        };
        let tokens_used = response.tokens_used();
        let cost_usd = self.pricing.cost_usd(&model, tokens_used);
        let duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            escalate,
            complexity = complexity_score,
            tokens_used,
            cost_usd,
            duration_ms,
            "pattern recognizer finished"
        );

        Ok(PatternRecognizerResult {
            analyzer: AnalyzerKind::PatternRecognizer,
            communication_style: analysis.communication_style,
            attachment_markers: analysis.attachment_markers,
            authenticity: analysis.authenticity,
            boundaries: analysis.boundaries,
            complexity_score,
            summary: analysis.summary,
            escalate_to_attachment_evaluator: escalate,
            metadata: RecognizerMetadata {
                analyzed_at: Utc::now(),
                duration_ms,
                model,
                tokens_used,
                cost_usd,
            },
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use chrono::TimeZone;

    fn style(consistency: Consistency) -> CommunicationStyle {
        CommunicationStyle {
            primary: "direct".to_string(),
            consistency,
            traits: vec![],
        }
    }

    fn secure_only() -> AttachmentMarkers {
        AttachmentMarkers {
            secure_markers: vec!["follows up on plans".to_string()],
            ..AttachmentMarkers::default()
        }
    }

    #[test]
    fn test_escalation_rules() {
        let consistent = style(Consistency::Consistent);
        assert!(should_escalate_to_attachment_evaluator(0.5, &consistent, &secure_only()));
        assert!(!should_escalate_to_attachment_evaluator(0.1, &consistent, &secure_only()));
        assert!(!should_escalate_to_attachment_evaluator(0.3, &consistent, &secure_only()));
        assert!(should_escalate_to_attachment_evaluator(0.1, &style(Consistency::Mixed), &secure_only()));
        assert!(should_escalate_to_attachment_evaluator(0.1, &style(Consistency::Inconsistent), &secure_only()));
    }

    #[test]
    fn test_single_marker_family_does_not_escalate() {
        let consistent = style(Consistency::Consistent);
        let anxious = AttachmentMarkers {
            anxiety_markers: vec!["double texting".to_string()],
            ..AttachmentMarkers::default()
        };
        let avoidant = AttachmentMarkers {
            avoidance_markers: vec!["deflects plans".to_string()],
            ..AttachmentMarkers::default()
        };
        let both = AttachmentMarkers {
            anxiety_markers: anxious.anxiety_markers.clone(),
            avoidance_markers: avoidant.avoidance_markers.clone(),
            ..AttachmentMarkers::default()
        };
        assert!(!should_escalate_to_attachment_evaluator(0.1, &consistent, &anxious));
        assert!(!should_escalate_to_attachment_evaluator(0.1, &consistent, &avoidant));
        assert!(should_escalate_to_attachment_evaluator(0.1, &consistent, &both));
    }

    #[test]
    fn test_oversized_window_keeps_everything_up_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
        let input = AnalyzerInput {
            messages: vec![
                NormalizedMessage::new("old", "m", "u", now - TimeDelta::days(3_000), "hi", Direction::User),
                NormalizedMessage::new("later", "m", "u", now + TimeDelta::hours(1), "hi", Direction::User),
            ],
            matches: vec![],
            participants: vec![],
            user_id: "u".to_string(),
        };

        let kept = filter_messages_within(&input, now, i64::MAX / 1000);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "old");
        assert_eq!(sample_messages_within(&input, 10, now, i64::MAX).len(), 1);
    }

    #[test]
    fn test_transcript_line_format() {
        let at = Utc.with_ymd_and_hms(2024, 7, 4, 22, 15, 0).unwrap();
        let msg = NormalizedMessage::new("1", "m", "u", at, "see you there", Direction::User);
        assert_eq!(format_transcript_line(&msg), "[2024-07-04] User: see you there");
        let reply = NormalizedMessage::new("2", "m", "x", at, "great", Direction::Match);
        assert_eq!(format_transcript_line(&reply), "[2024-07-04] Match: great");
    }
}

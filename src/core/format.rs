//! Display helpers: durations and content-free message placeholders

use crate::types::{Direction, ExampleSender, NormalizedMessage, SanitizedExample};

const MINUTE: u64 = 60_000;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render a duration using its largest whole unit, e.g. "3 hours"
pub fn format_time_duration(ms: u64) -> String {
    let (count, unit) = if ms >= DAY {
        (ms / DAY, "day")
    } else if ms >= HOUR {
        (ms / HOUR, "hour")
    } else if ms >= MINUTE {
        (ms / MINUTE, "minute")
    } else {
        return "less than a minute".to_string();
    };

    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Replace a message with a placeholder chosen by length bucket.
/// The original text never appears in the output.
pub fn sanitize_message_text(text: &str, sender: Direction) -> String {
    let len = text.chars().count();
    let placeholder = match (sender, len) {
        (Direction::User, l) if l < 10 => "[Short message from you]",
        (Direction::User, l) if l < 50 => "[Message from you]",
        (Direction::User, _) => "[Longer message from you]",
        (Direction::Match, l) if l < 10 => "[Short message from them]",
        (Direction::Match, l) if l < 50 => "[Message from them]",
        (Direction::Match, _) => "[Longer message from them]",
    };
    placeholder.to_string()
}

/// Up to `max_examples` sanitized messages in time order, each annotated with
/// the gap since the previous example
pub fn create_sanitized_examples(
    messages: &[NormalizedMessage],
    max_examples: usize,
) -> Vec<SanitizedExample> {
    let mut sorted: Vec<&NormalizedMessage> = messages.iter().collect();
    sorted.sort_by_key(|m| m.sent_at);

    let mut examples = Vec::with_capacity(max_examples.min(sorted.len()));
    let mut previous: Option<&NormalizedMessage> = None;

    for message in sorted.into_iter().take(max_examples) {
        let timing = previous.map(|prev| {
            let gap = (message.sent_at - prev.sent_at).num_milliseconds().max(0) as u64;
            format_time_duration(gap)
        });

        examples.push(SanitizedExample {
            text: sanitize_message_text(&message.body, message.direction),
            sender: match message.direction {
                Direction::User => ExampleSender::You,
                Direction::Match => ExampleSender::Them,
            },
            timing,
        });
        previous = Some(message);
    }

    examples
}

// =============================================================================
// TESTS
// =============================================================================

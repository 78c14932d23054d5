//! Rapport: behavioral pattern analysis over dating-app message history
//!
//! Pipeline: messages → metrics → patterns → (batch | heuristics) → insights,
//! with the LLM pattern recognizer running alongside over the same messages.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::{Config, Thresholds};
pub use error::{Error, Result};

// =============================================================================
// IMBALANCE THRESHOLDS [C]
// =============================================================================

/// Balance at or above this is a balanced conversation
pub const BALANCE_BALANCED: f64 = 0.45;

/// Balance at or above this (and below balanced) is a slight lean
pub const BALANCE_SLIGHT: f64 = 0.30;

// =============================================================================
// TIMING THRESHOLDS [C] - average response time, milliseconds
// =============================================================================

pub const MINUTE_MS: f64 = 60_000.0;
pub const HOUR_MS: f64 = 60.0 * MINUTE_MS;
pub const DAY_MS: f64 = 24.0 * HOUR_MS;

/// Below 5 minutes: instant messaging
pub const TIMING_INSTANT_MS: f64 = 5.0 * MINUTE_MS;

/// Below 2 hours: active conversation
pub const TIMING_ACTIVE_MS: f64 = 2.0 * HOUR_MS;

/// Below 12 hours: casual chat
pub const TIMING_CASUAL_MS: f64 = 12.0 * HOUR_MS;

/// Below 48 hours: slow burn
pub const TIMING_SLOW_BURN_MS: f64 = 48.0 * HOUR_MS;

/// Below 7 days: sporadic. At or above: ghosting
pub const TIMING_SPORADIC_MS: f64 = 7.0 * DAY_MS;

/// Response-gap samples needed for full timing confidence
pub const TIMING_FULL_CONFIDENCE_SAMPLES: usize = 10;

// =============================================================================
// RECOGNIZER [C]
// =============================================================================

/// Complexity above this escalates to the attachment evaluator
pub const ESCALATION_COMPLEXITY: f64 = 0.3;

/// Trailing window of messages sent to the model
pub const RECENCY_WINDOW_DAYS: i64 = 90;

/// Hard cap on transcript lines sent to the model
pub const DEFAULT_MAX_MESSAGES: usize = 200;

/// Sanitized examples attached to a pattern insight
pub const DEFAULT_MAX_EXAMPLES: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

//! Configuration: tunable thresholds, LLM settings and pricing
//!
//! Loaded from an optional TOML file, then overridden by `RAPPORT_*`
//! environment variables.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::{
    BALANCE_BALANCED, BALANCE_SLIGHT, DEFAULT_MAX_MESSAGES, ESCALATION_COMPLEXITY,
    RECENCY_WINDOW_DAYS, TIMING_ACTIVE_MS, TIMING_CASUAL_MS, TIMING_FULL_CONFIDENCE_SAMPLES,
    TIMING_INSTANT_MS, TIMING_SLOW_BURN_MS, TIMING_SPORADIC_MS,
};

pub const ENV_API_KEY: &str = "RAPPORT_API_KEY";
pub const ENV_BASE_URL: &str = "RAPPORT_LLM_BASE_URL";
pub const ENV_MODEL: &str = "RAPPORT_LLM_MODEL";

/// Classifier cut points. Defaults are the crate constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub balance_balanced: f64,
    pub balance_slight: f64,
    pub timing_instant_ms: f64,
    pub timing_active_ms: f64,
    pub timing_casual_ms: f64,
    pub timing_slow_burn_ms: f64,
    pub timing_sporadic_ms: f64,
    pub full_confidence_samples: usize,
    pub escalation_complexity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            balance_balanced: BALANCE_BALANCED,
            balance_slight: BALANCE_SLIGHT,
            timing_instant_ms: TIMING_INSTANT_MS,
            timing_active_ms: TIMING_ACTIVE_MS,
            timing_casual_ms: TIMING_CASUAL_MS,
            timing_slow_burn_ms: TIMING_SLOW_BURN_MS,
            timing_sporadic_ms: TIMING_SPORADIC_MS,
            full_confidence_samples: TIMING_FULL_CONFIDENCE_SAMPLES,
            escalation_complexity: ESCALATION_COMPLEXITY,
        }
    }
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub max_messages: usize,
    pub recency_days: i64,
    pub timeout_secs: u64,
    /// Only ever read from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_messages: DEFAULT_MAX_MESSAGES,
            recency_days: RECENCY_WINDOW_DAYS,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub llm: LlmConfig,
    /// Model id → USD per token. Merged over the built-in table.
    pub pricing: BTreeMap<String, f64>,
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> crate::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reject values the analyzers cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let days = self.llm.recency_days;
        if days <= 0 || TimeDelta::try_days(days).is_none() {
            return Err(Error::InvalidConfig(format!(
                "llm.recency_days must be a positive number of days, got {}",
                days
            )));
        }
        if self.llm.max_messages == 0 {
            return Err(Error::InvalidConfig("llm.max_messages must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Apply `RAPPORT_*` overrides from a variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.llm.model = model;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

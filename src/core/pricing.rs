//! Per-model token pricing for cost estimation
//!
//! Prices are USD per token (not per million). The table is injected into the
//! recognizer and only ever read.

use std::collections::BTreeMap;

/// Model id → USD per token
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingTable {
    prices: BTreeMap<String, f64>,
}

impl PricingTable {
    /// Empty table: every model costs nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Blended input/output rates for common chat models
    pub fn builtin() -> Self {
        Self::new()
            .with_price("gpt-4o", 5.0 / 1_000_000.0)
            .with_price("gpt-4o-mini", 0.3 / 1_000_000.0)
            .with_price("gpt-4.1", 4.0 / 1_000_000.0)
            .with_price("gpt-4.1-mini", 0.8 / 1_000_000.0)
    }

    pub fn with_price(mut self, model: impl Into<String>, per_token: f64) -> Self {
        self.prices.insert(model.into(), per_token);
        self
    }

    /// Overlay entries (config wins over built-ins)
    pub fn merged(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        for (model, price) in overrides {
            self.prices.insert(model.clone(), *price);
        }
        self
    }

    /// Exact match first, then the longest known id the model starts with,
    /// so dated snapshots like "gpt-4o-mini-2024-07-18" resolve.
    pub fn price_per_token(&self, model: &str) -> Option<f64> {
        if let Some(price) = self.prices.get(model) {
            return Some(*price);
        }
        self.prices
            .iter()
            .filter(|(id, _)| model.starts_with(id.as_str()))
            .max_by_key(|(id, _)| id.len())
            .map(|(_, price)| *price)
    }

    /// Cost of a call. Unknown models cost 0 and are logged.
    pub fn cost_usd(&self, model: &str, tokens: u64) -> f64 {
        match self.price_per_token(model) {
            Some(price) => tokens as f64 * price,
            None => {
                tracing::warn!(model, "no price for model, reporting zero cost");
                0.0
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

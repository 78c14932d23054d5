//! Crate-level error type

use thiserror::Error;

use crate::core::{LlmError, RecognizerError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    InvalidConfig(String),

    #[error("no API key configured (set RAPPORT_API_KEY)")]
    MissingApiKey,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Recognizer(#[from] RecognizerError),
}

// =============================================================================
// TESTS
// =============================================================================

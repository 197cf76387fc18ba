//! Error types for SmartApply.

use std::time::Duration;

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while turning a finished application into a document.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("{stage} returned an empty result")]
    EmptyOutput { stage: &'static str },

    #[error("Synthesis timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to serialize application record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;

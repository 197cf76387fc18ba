//! Configuration types.
//!
//! Everything is read from environment variables. Parsing goes through a
//! lookup function so tests can supply values without touching the process
//! environment.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};
use crate::synthesis::SynthesisConfig;

/// What the intake does after the synthesis service fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisFailurePolicy {
    /// Stay in the processing stage until the applicant types a reset
    /// command.
    #[default]
    Stall,
    /// Report the failure, then start a fresh application.
    Reset,
}

impl std::str::FromStr for SynthesisFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stall" => Ok(Self::Stall),
            "reset" => Ok(Self::Reset),
            other => Err(ConfigError::InvalidValue {
                key: "SMART_APPLY_ON_SYNTHESIS_FAILURE".to_string(),
                message: format!("expected 'stall' or 'reset', got '{other}'"),
            }),
        }
    }
}

/// Intake conversation settings.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Failed email attempts before the field is skipped.
    pub max_email_attempts: u32,
    /// Upper bound on one synthesis call. `None` waits indefinitely.
    pub synthesis_timeout: Option<Duration>,
    pub on_synthesis_failure: SynthesisFailurePolicy,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_email_attempts: 3,
            synthesis_timeout: Some(Duration::from_secs(300)), // 5 minutes
            on_synthesis_failure: SynthesisFailurePolicy::Stall,
        }
    }
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_email_attempts = match get("SMART_APPLY_MAX_EMAIL_ATTEMPTS") {
            Some(v) => parse_number::<u32>("SMART_APPLY_MAX_EMAIL_ATTEMPTS", &v)?.max(1),
            None => defaults.max_email_attempts,
        };

        // 0 disables the timeout.
        let synthesis_timeout = match get("SMART_APPLY_SYNTHESIS_TIMEOUT_SECS") {
            Some(v) => match parse_number::<u64>("SMART_APPLY_SYNTHESIS_TIMEOUT_SECS", &v)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => defaults.synthesis_timeout,
        };

        let on_synthesis_failure = match get("SMART_APPLY_ON_SYNTHESIS_FAILURE") {
            Some(v) => v.parse()?,
            None => defaults.on_synthesis_failure,
        };

        Ok(Self {
            max_email_attempts,
            synthesis_timeout,
            on_synthesis_failure,
        })
    }
}

/// Process-level configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    /// Port for the HTTP chat API. Disabled when unset.
    pub http_port: Option<u16>,
    pub intake: IntakeConfig,
    pub synthesis: SynthesisConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend: LlmBackend = match get("SMART_APPLY_BACKEND") {
            Some(v) => v.parse()?,
            None => LlmBackend::Anthropic,
        };

        let key_var = backend.api_key_var();
        let api_key = get(key_var)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(key_var.to_string()))?;

        let model = get("SMART_APPLY_MODEL").unwrap_or_else(|| backend.default_model().to_string());

        let http_port = get("SMART_APPLY_HTTP_PORT")
            .map(|v| parse_number::<u16>("SMART_APPLY_HTTP_PORT", &v))
            .transpose()?;

        let mut synthesis = SynthesisConfig::default();
        if let Some(v) = get("SMART_APPLY_TEMPERATURE") {
            synthesis.temperature = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMART_APPLY_TEMPERATURE".to_string(),
                message: format!("'{v}' is not a number"),
            })?;
        }

        Ok(Self {
            llm: LlmConfig {
                backend,
                api_key: SecretString::from(api_key),
                model,
            },
            http_port,
            intake: IntakeConfig::from_lookup(&get)?,
            synthesis,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{value}' is not a valid number"),
    })
}

//! Environment-driven configuration.

use std::{env, time::Duration};

use crate::error::{AgentError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "AGENT_MODEL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "AGENT_MODEL_TIMEOUT";
/// Environment variable toggling verbose prompt/response tracing.
pub const DEBUG_ENV: &str = "AGENT_DEBUG";

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default model.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for a chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelConfig {
    /// Settings with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MissingApiKey`] if `GROQ_API_KEY` is unset or
    /// empty and [`AgentError::Configuration`] for a malformed timeout.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_var(API_KEY_ENV).ok_or_else(|| {
            AgentError::MissingApiKey(format!("{API_KEY_ENV} environment variable not set"))
        })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = non_empty_var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(model) = non_empty_var(MODEL_ENV) {
            config.model = model;
        }
        if let Some(raw) = non_empty_var(TIMEOUT_ENV) {
            let secs: u64 = raw.parse().map_err(|_| AgentError::Configuration {
                message: format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Overrides the base URL (e.g. for a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Whether `AGENT_DEBUG=1` is set.
pub fn debug_enabled() -> bool {
    env::var(DEBUG_ENV).map(|v| v == "1").unwrap_or(false)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

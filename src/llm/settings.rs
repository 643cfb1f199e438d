//! Settings for the upstream chat completions endpoint.

use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

use crate::config::schema::LlmConfig;

/// A required setting could not be resolved from config or environment.
#[derive(Debug, Error)]
#[error("missing {variable}; set it in the environment or under [llm] in the config file")]
pub struct MissingSetting {
    /// Name of the environment variable that was consulted last.
    pub variable: String,
}

/// The three parameters needed to construct the shared chat client.
#[derive(Clone)]
pub struct LlmSettings {
    /// Base URL of the chat completions API.
    pub endpoint: String,
    /// Bearer credential for the API. Never rendered by `Debug`.
    pub credential: String,
    /// Model identifier requests are pinned to.
    pub model: String,
}

impl LlmSettings {
    /// Resolve settings from the config file with environment fallback.
    ///
    /// Each field falls back to `{PROVIDER}_BASE_URL`, `{PROVIDER}_API_KEY`
    /// and `{PROVIDER}_MODEL`, where the provider label comes from
    /// `llm.provider`.
    pub fn resolve(config: &LlmConfig) -> Result<Self, MissingSetting> {
        let prefix = config.provider.trim().to_uppercase();
        Ok(Self {
            endpoint: resolve_field(&config.base_url, &prefix, "BASE_URL")?,
            credential: resolve_field(&config.api_key, &prefix, "API_KEY")?,
            model: resolve_field(&config.model, &prefix, "MODEL")?,
        })
    }

    /// Check the settings are complete enough to construct a client.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        Url::parse(&self.endpoint)
            .map_err(|e| format!("endpoint '{}' is not a valid URL: {}", self.endpoint, e))?;
        if self.credential.trim().is_empty() {
            return Err("credential must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model identifier must not be empty".to_string());
        }
        Ok(())
    }
}

fn resolve_field(
    explicit: &Option<String>,
    prefix: &str,
    suffix: &str,
) -> Result<String, MissingSetting> {
    if let Some(value) = explicit {
        if !value.trim().is_empty() {
            return Ok(value.clone());
        }
    }
    let variable = format!("{}_{}", prefix, suffix);
    env::var(&variable)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(MissingSetting { variable })
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("endpoint", &self.endpoint)
            .field("credential", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

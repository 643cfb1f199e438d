//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Diagnostics HTTP server settings.
    pub server: ServerConfig,

    /// Upstream chat completions settings.
    pub llm: LlmConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Diagnostics HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8082").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Upstream chat completions configuration.
///
/// `base_url`, `api_key` and `model` may be left unset; each then falls
/// back to the `{provider}_BASE_URL`, `{provider}_API_KEY` and
/// `{provider}_MODEL` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider label, used as the environment variable prefix.
    pub provider: String,

    /// Base URL of the chat completions API.
    pub base_url: Option<String>,

    /// Bearer credential for the API.
    pub api_key: Option<String>,

    /// Model identifier requests are pinned to.
    pub model: Option<String>,

    /// Upstream request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "OPENAI".to_string(),
            base_url: None,
            api_key: None,
            model: None,
            request_timeout_secs: 180,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

//! The shared chat completions client handle.
//!
//! The coordinator treats this as an opaque resource: constructed once per
//! lifecycle episode, borrowed transiently by request handlers, released
//! once at teardown. The upstream wire protocol is not modeled here.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::lifecycle::factory::{ClientFactory, ConstructionError, TeardownError};
use crate::llm::settings::LlmSettings;

/// Handle to the upstream chat completions endpoint.
///
/// Owns a pooled HTTP client pre-configured with the bearer credential and
/// request timeout.
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl ChatClient {
    pub(crate) fn connect(
        settings: &LlmSettings,
        timeout: Duration,
    ) -> Result<Self, ConstructionError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|e| {
            ConstructionError(format!("invalid endpoint '{}': {}", settings.endpoint, e))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.credential))
            .map_err(|e| ConstructionError(format!("credential is not a valid header value: {}", e)))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConstructionError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            model: settings.model.clone(),
        })
    }

    /// Model identifier requests are pinned to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Base URL of the upstream API.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The pooled HTTP client, for handlers that talk upstream.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

/// Production factory: builds [`ChatClient`] handles from resolved
/// settings.
pub struct LlmClientFactory {
    request_timeout: Duration,
}

impl LlmClientFactory {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

#[async_trait]
impl ClientFactory for LlmClientFactory {
    type Handle = ChatClient;

    async fn construct(&self, settings: &LlmSettings) -> Result<ChatClient, ConstructionError> {
        ChatClient::connect(settings, self.request_timeout)
    }

    async fn teardown(&self, handle: Arc<ChatClient>) -> Result<(), TeardownError> {
        // The pool closes its idle connections once the last transient
        // borrow of the handle drops.
        drop(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LlmSettings {
        LlmSettings {
            endpoint: "https://llm.internal.example:8443".to_string(),
            credential: "test-key".to_string(),
            model: "qwen-plus".to_string(),
        }
    }

    #[test]
    fn connect_builds_a_handle() {
        let client = ChatClient::connect(&settings(), Duration::from_secs(5)).unwrap();
        assert_eq!(client.model(), "qwen-plus");
        assert_eq!(client.endpoint().as_str(), "https://llm.internal.example:8443/");
    }

    #[test]
    fn connect_rejects_invalid_endpoints() {
        let mut bad = settings();
        bad.endpoint = "::".to_string();
        assert!(ChatClient::connect(&bad, Duration::from_secs(5)).is_err());
    }

    #[test]
    fn debug_output_omits_the_credential() {
        let client = ChatClient::connect(&settings(), Duration::from_secs(5)).unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("qwen-plus"));
        assert!(!rendered.contains("test-key"));
    }
}

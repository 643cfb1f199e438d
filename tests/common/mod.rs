//! Shared helpers for lifecycle integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat_gateway::lifecycle::factory::{ClientFactory, ConstructionError, TeardownError};
use chat_gateway::llm::settings::LlmSettings;

/// Stand-in for the external chat client.
pub struct FakeClient {
    pub model: String,
}

#[derive(Default)]
struct Counters {
    constructed: AtomicUsize,
    torn_down: AtomicUsize,
}

/// Instrumented factory: counts lifecycle calls and can slow down or fail
/// either side. Clones share the same counters.
#[derive(Clone, Default)]
pub struct RecordingFactory {
    counters: Arc<Counters>,
    construct_delay: Duration,
    teardown_delay: Duration,
    fail_construct: bool,
    fail_teardown: bool,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn construct_delay(mut self, delay: Duration) -> Self {
        self.construct_delay = delay;
        self
    }

    pub fn teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = delay;
        self
    }

    pub fn fail_construct(mut self) -> Self {
        self.fail_construct = true;
        self
    }

    pub fn fail_teardown(mut self) -> Self {
        self.fail_teardown = true;
        self
    }

    pub fn constructed(&self) -> usize {
        self.counters.constructed.load(Ordering::SeqCst)
    }

    pub fn torn_down(&self) -> usize {
        self.counters.torn_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientFactory for RecordingFactory {
    type Handle = FakeClient;

    async fn construct(&self, settings: &LlmSettings) -> Result<FakeClient, ConstructionError> {
        if !self.construct_delay.is_zero() {
            tokio::time::sleep(self.construct_delay).await;
        }
        if self.fail_construct {
            return Err(ConstructionError("injected construction failure".to_string()));
        }
        self.counters.constructed.fetch_add(1, Ordering::SeqCst);
        Ok(FakeClient {
            model: settings.model.clone(),
        })
    }

    async fn teardown(&self, _handle: Arc<FakeClient>) -> Result<(), TeardownError> {
        if !self.teardown_delay.is_zero() {
            tokio::time::sleep(self.teardown_delay).await;
        }
        self.counters.torn_down.fetch_add(1, Ordering::SeqCst);
        if self.fail_teardown {
            return Err(TeardownError("injected teardown failure".to_string()));
        }
        Ok(())
    }
}

/// Valid settings pointing at a placeholder endpoint.
pub fn valid_settings() -> LlmSettings {
    LlmSettings {
        endpoint: "https://llm.internal.example:8443".to_string(),
        credential: "test-key".to_string(),
        model: "qwen-plus".to_string(),
    }
}

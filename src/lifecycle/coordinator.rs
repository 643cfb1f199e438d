//! The process-wide coordinator for the shared chat client.
//!
//! # Responsibilities
//! - Own the single client handle and its lifecycle state
//! - Serialize startup attempts; at most one client is ever live
//! - Run shutdown as a single-flight episode: one teardown, shared by all
//!   concurrent callers
//! - Expose a non-blocking started snapshot for health probes
//!
//! # Design Decisions
//! - One std mutex guards all state; it is never held across an await
//! - Completion is signalled with per-episode Tokio broadcast channels
//! - A failed teardown still releases the state machine and wakes followers
//! - No internal timeout bounds a follower's wait; callers that need a
//!   bound wrap `shutdown()` in `tokio::time::timeout`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::lifecycle::factory::{ClientFactory, ConstructionError};
use crate::lifecycle::state::{LifecycleSlot, LifecycleState, ShutdownTicket};
use crate::llm::settings::LlmSettings;
use crate::observability::metrics;

/// Errors surfaced by [`ClientCoordinator::startup`].
#[derive(Debug, Error)]
pub enum StartupError {
    /// Construction parameters are missing or invalid.
    #[error("invalid client settings: {0}")]
    Config(String),

    /// The construction adapter failed; the slot rolled back to idle.
    #[error("client construction failed")]
    Construction(#[source] ConstructionError),

    /// A client is already live, or a startup or shutdown is in flight.
    /// Recoverable: retry once the lifecycle settles.
    #[error("chat client slot is busy")]
    Busy,
}

/// Coordinates the lifecycle of the one shared chat client.
///
/// Constructed once by the composition root and passed by `Arc` to every
/// consumer; there is deliberately no global instance.
pub struct ClientCoordinator<F: ClientFactory> {
    factory: F,
    slot: Mutex<LifecycleSlot<F::Handle>>,
    started: AtomicBool,
}

impl<F: ClientFactory> ClientCoordinator<F> {
    /// Create an idle coordinator around the given construction adapter.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slot: Mutex::new(LifecycleSlot::new()),
            started: AtomicBool::new(false),
        }
    }

    // Transitions are plain field writes, so a slot behind a poisoned
    // lock is still consistent; recover the guard instead of panicking.
    fn slot(&self) -> MutexGuard<'_, LifecycleSlot<F::Handle>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Construct and install the shared client.
    ///
    /// Validates `settings`, claims the startup transition, and runs the
    /// construction adapter outside the state lock. A call while a client
    /// is already live, or while any startup or shutdown is in flight, is
    /// rejected with [`StartupError::Busy`]; shut down first.
    pub async fn startup(&self, settings: &LlmSettings) -> Result<(), StartupError> {
        settings.validate().map_err(StartupError::Config)?;

        if !self.slot().try_begin_startup() {
            return Err(StartupError::Busy);
        }

        tracing::info!(
            endpoint = %settings.endpoint,
            model = %settings.model,
            "Starting shared chat client"
        );

        match self.factory.construct(settings).await {
            Ok(handle) => {
                self.slot().complete_startup(Arc::new(handle));
                self.started.store(true, Ordering::Release);
                metrics::record_client_started(true);
                tracing::info!("Shared chat client is live");
                Ok(())
            }
            Err(err) => {
                self.slot().abort_startup();
                tracing::error!(error = %err, "Chat client construction failed");
                Err(StartupError::Construction(err))
            }
        }
    }

    /// Tear down the shared client.
    ///
    /// Single-flight: among concurrent callers exactly one runs the
    /// teardown; the rest wait for its completion signal. Always returns
    /// once the episode has finished, whether or not the underlying close
    /// succeeded (a failure is logged, never propagated). Calling while
    /// idle is a no-op. A call that lands mid-startup waits for the
    /// startup to settle, then tears the new client down.
    ///
    /// There is no internal timeout: a stuck close blocks every waiter.
    /// Bound the wait externally with `tokio::time::timeout` if needed.
    pub async fn shutdown(&self) {
        loop {
            let ticket = self.slot().begin_shutdown_or_join();
            match ticket {
                ShutdownTicket::Clear => return,
                ShutdownTicket::AwaitStartup(mut settled) => {
                    let _ = settled.recv().await;
                }
                ShutdownTicket::Follower(mut done) => {
                    let _ = done.recv().await;
                    return;
                }
                ShutdownTicket::Leader { handle } => {
                    self.started.store(false, Ordering::Release);
                    metrics::record_client_started(false);
                    tracing::info!("Shutting down shared chat client");

                    // Teardown runs outside the lock so state queries and
                    // late followers stay live while it drains.
                    if let Err(err) = self.factory.teardown(handle).await {
                        tracing::warn!(
                            error = %err,
                            "Chat client teardown failed, releasing the slot anyway"
                        );
                    }

                    self.slot().complete_shutdown();
                    metrics::record_shutdown_episode();
                    tracing::info!("Chat client shutdown complete");
                    return;
                }
            }
        }
    }

    /// Point-in-time snapshot of whether a client is live.
    ///
    /// Lock-free: the answer can be stale the moment it is returned when a
    /// startup or shutdown races it. That relaxation is the contract; the
    /// check must never block a health probe.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Current lifecycle phase, read under the state lock.
    pub fn state(&self) -> LifecycleState {
        self.slot().state
    }

    /// Borrow the live client for one operation.
    ///
    /// Returns `None` unless a client is currently installed. The handle
    /// is for transient use; caching it across requests defeats the
    /// shutdown coordination.
    pub fn client(&self) -> Option<Arc<F::Handle>> {
        let slot = self.slot();
        match slot.state {
            LifecycleState::Started => slot.handle.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::factory::TeardownError;
    use async_trait::async_trait;

    struct StubFactory {
        fail_construct: bool,
    }

    struct StubHandle;

    #[async_trait]
    impl ClientFactory for StubFactory {
        type Handle = StubHandle;

        async fn construct(&self, _settings: &LlmSettings) -> Result<StubHandle, ConstructionError> {
            if self.fail_construct {
                Err(ConstructionError("refused".to_string()))
            } else {
                Ok(StubHandle)
            }
        }

        async fn teardown(&self, _handle: Arc<StubHandle>) -> Result<(), TeardownError> {
            Ok(())
        }
    }

    fn settings() -> LlmSettings {
        LlmSettings {
            endpoint: "https://llm.internal.example:8443".to_string(),
            credential: "test-key".to_string(),
            model: "qwen-plus".to_string(),
        }
    }

    #[tokio::test]
    async fn startup_installs_a_client() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: false });
        assert!(!coordinator.is_started());

        coordinator.startup(&settings()).await.unwrap();

        assert!(coordinator.is_started());
        assert_eq!(coordinator.state(), LifecycleState::Started);
        assert!(coordinator.client().is_some());
    }

    #[tokio::test]
    async fn second_startup_is_rejected_while_live() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: false });
        coordinator.startup(&settings()).await.unwrap();

        let result = coordinator.startup(&settings()).await;
        assert!(matches!(result, Err(StartupError::Busy)));
        assert!(coordinator.is_started());
    }

    #[tokio::test]
    async fn invalid_settings_are_rejected_before_any_transition() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: false });

        let mut bad = settings();
        bad.endpoint = String::new();
        let result = coordinator.startup(&bad).await;

        assert!(matches!(result, Err(StartupError::Config(_))));
        assert_eq!(coordinator.state(), LifecycleState::Idle);
        assert!(!coordinator.is_started());
    }

    #[tokio::test]
    async fn construction_failure_rolls_back_to_idle() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: true });

        let result = coordinator.startup(&settings()).await;

        assert!(matches!(result, Err(StartupError::Construction(_))));
        assert_eq!(coordinator.state(), LifecycleState::Idle);
        assert!(coordinator.client().is_none());
    }

    #[tokio::test]
    async fn shutdown_from_idle_is_a_noop() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: false });
        coordinator.shutdown().await;
        assert_eq!(coordinator.state(), LifecycleState::Idle);
    }

    #[tokio::test]
    async fn accessor_is_gated_by_state() {
        let coordinator = ClientCoordinator::new(StubFactory { fail_construct: false });
        assert!(coordinator.client().is_none());

        coordinator.startup(&settings()).await.unwrap();
        assert!(coordinator.client().is_some());

        coordinator.shutdown().await;
        assert!(coordinator.client().is_none());
    }
}

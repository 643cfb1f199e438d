//! Construction adapter seam between the coordinator and the external
//! client.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::settings::LlmSettings;

/// The adapter could not produce a client.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConstructionError(pub String);

/// The underlying close failed. Reported by the shutdown leader, never a
/// reason to keep the lifecycle from reaching idle.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TeardownError(pub String);

/// Builds and releases the externally constructed chat client.
///
/// Both operations may take arbitrarily long; the coordinator runs them
/// outside its state lock and stays answerable while they do.
#[async_trait]
pub trait ClientFactory: Send + Sync + 'static {
    /// The opaque handle owned by the coordinator while started.
    type Handle: Send + Sync + 'static;

    /// Produce a live handle from validated settings.
    async fn construct(&self, settings: &LlmSettings) -> Result<Self::Handle, ConstructionError>;

    /// Release the handle's underlying connections.
    async fn teardown(&self, handle: Arc<Self::Handle>) -> Result<(), TeardownError>;
}

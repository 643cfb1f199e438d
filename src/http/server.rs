//! Diagnostics HTTP surface.
//!
//! # Responsibilities
//! - Liveness and readiness probes backed by the coordinator
//! - A status endpoint reporting the live client's identity
//! - Middleware: request IDs, tracing, request timeout
//! - Graceful shutdown on SIGTERM/SIGINT

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestId, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::schema::ServerConfig;
use crate::lifecycle::signals::shutdown_signal;
use crate::GatewayCoordinator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<GatewayCoordinator>,
}

/// Fresh UUID v4 per request, set as `x-request-id`.
#[derive(Clone, Copy)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Diagnostics server for the gateway.
pub struct DiagnosticsServer {
    router: Router,
    config: ServerConfig,
}

impl DiagnosticsServer {
    /// Create a new server over the shared coordinator.
    pub fn new(config: ServerConfig, coordinator: Arc<GatewayCoordinator>) -> Self {
        let router = build_router(AppState { coordinator })
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self { router, config }
    }

    /// Run the server until a termination signal, draining before return.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Diagnostics server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Diagnostics server stopped");
        Ok(())
    }

    /// Get a reference to the server config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Build the diagnostics router. Exposed for in-process tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
        .route("/status", get(status))
        .with_state(state)
}

/// Process liveness: 200 while the process can answer at all.
async fn live() -> StatusCode {
    StatusCode::OK
}

/// Readiness: 200 only while the shared chat client is live.
///
/// Reads the coordinator's lock-free snapshot; the answer can race a
/// concurrent startup or shutdown.
async fn ready(State(state): State<AppState>) -> StatusCode {
    if state.coordinator.is_started() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    started: bool,
    model: Option<String>,
    endpoint: Option<String>,
}

/// Client identity as currently installed.
async fn status(State(state): State<AppState>) -> Json<StatusBody> {
    // Borrowed transiently; never cached in state.
    let client = state.coordinator.client();
    Json(StatusBody {
        started: client.is_some(),
        model: client.as_ref().map(|c| c.model().to_string()),
        endpoint: client.as_ref().map(|c| c.endpoint().to_string()),
    })
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_client_started` (gauge): 1 while the shared chat client is live
//! - `gateway_shutdown_episodes_total` (counter): completed teardown episodes
//!
//! # Design Decisions
//! - Recording is cheap (atomic updates) and safe before the exporter is
//!   installed; updates are simply dropped until then

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_gauge!(
                "gateway_client_started",
                "Whether the shared chat client is currently live"
            );
            describe_counter!(
                "gateway_shutdown_episodes_total",
                "Completed chat client shutdown episodes"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record the started gauge at lifecycle transitions.
pub fn record_client_started(started: bool) {
    gauge!("gateway_client_started").set(if started { 1.0 } else { 0.0 });
}

/// Count a completed shutdown episode.
pub fn record_shutdown_episode() {
    counter!("gateway_shutdown_episodes_total").increment(1);
}

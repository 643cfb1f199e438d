//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at boot
//! - Respect RUST_LOG when set, the config default otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `default_level` applies to the gateway's own crate; `RUST_LOG`
/// overrides everything when set.
pub fn init_tracing(default_level: &str) {
    let fallback = format!("chat_gateway={},tower_http=info", default_level);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Gateway server binary.
//!
//! Boot sequence: load config → init tracing → init metrics → start the
//! shared chat client → serve diagnostics. Stop sequence: drain the HTTP
//! server on SIGTERM/SIGINT, then release the client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use chat_gateway::config::loader;
use chat_gateway::observability::{logging, metrics};
use chat_gateway::{ClientCoordinator, DiagnosticsServer, LlmClientFactory, LlmSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "gateway.toml".to_string());
    let config = loader::load_or_default(Path::new(&config_path))?;

    logging::init_tracing(&config.observability.log_level);

    tracing::info!("chat-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        provider = %config.llm.provider,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let coordinator = Arc::new(ClientCoordinator::new(LlmClientFactory::new(
        Duration::from_secs(config.llm.request_timeout_secs),
    )));

    let settings = match LlmSettings::resolve(&config.llm) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Chat client settings are incomplete");
            return Err(e.into());
        }
    };

    if let Err(e) = coordinator.startup(&settings).await {
        tracing::error!(error = %e, "Failed to start the shared chat client");
        return Err(e.into());
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = DiagnosticsServer::new(config.server.clone(), coordinator.clone());
    server.run(listener).await?;

    // The server has drained; release the shared client.
    coordinator.shutdown().await;

    tracing::info!("Shutdown complete");
    Ok(())
}

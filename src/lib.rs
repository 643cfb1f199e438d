//! Chat gateway shell for a retrieval-augmented chat front end.
//!
//! The gateway owns one expensive upstream resource: the shared chat
//! completions client, created once at boot and torn down once at stop
//! while many concurrent request handlers borrow it. The `lifecycle`
//! module coordinates that resource; `config`, `llm`, `http` and
//! `observability` provide the surrounding service shell.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod llm;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use http::DiagnosticsServer;
pub use lifecycle::coordinator::{ClientCoordinator, StartupError};
pub use lifecycle::factory::ClientFactory;
pub use llm::client::{ChatClient, LlmClientFactory};
pub use llm::settings::LlmSettings;

/// The coordinator instantiated with the production client factory.
pub type GatewayCoordinator = ClientCoordinator<LlmClientFactory>;

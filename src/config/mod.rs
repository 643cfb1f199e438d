//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway.toml → loader.rs → schema.rs structs → validation.rs → consumers
//! Environment ({PROVIDER}_BASE_URL / _API_KEY / _MODEL) → llm settings
//! ```
//!
//! # Design Decisions
//! - A missing config file falls back to defaults; the environment alone
//!   can carry the required LLM settings
//! - Structural validation happens at load time; the resolved client
//!   settings are re-validated at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;

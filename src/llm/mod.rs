//! Upstream LLM client subsystem.
//!
//! # Responsibilities
//! - Resolve endpoint/credential/model settings (config file + environment)
//! - Build the shared chat client handle the coordinator owns
//! - Keep the credential out of logs and Debug output

pub mod client;
pub mod settings;

pub use client::{ChatClient, LlmClientFactory};
pub use settings::LlmSettings;

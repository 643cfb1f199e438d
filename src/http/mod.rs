//! Diagnostics HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Probe → Router → handler → coordinator snapshot / accessor → response
//! ```

pub mod server;

pub use server::{build_router, AppState, DiagnosticsServer};

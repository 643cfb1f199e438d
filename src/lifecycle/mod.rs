//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (coordinator.rs):
//!     Validate settings → Claim Idle→Starting → Construct client → Install
//!
//! Shutdown (coordinator.rs + state.rs):
//!     First caller wins leadership → Teardown outside the lock →
//!     Completion signal → Followers wake
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Drain HTTP server → Coordinator shutdown
//! ```
//!
//! # Design Decisions
//! - One mutex guards all lifecycle state, never held across an await
//! - Per-episode broadcast channels carry startup/shutdown completion
//! - Teardown failure is logged, not propagated; the slot always reaches idle

pub mod coordinator;
pub mod factory;
pub mod signals;
pub mod state;

pub use coordinator::{ClientCoordinator, StartupError};
pub use factory::{ClientFactory, ConstructionError, TeardownError};
pub use state::LifecycleState;

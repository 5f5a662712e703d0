//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Every listener subscribes to one broadcast shutdown channel
//! - No reload signal: policies are fixed for the process lifetime

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

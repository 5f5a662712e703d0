//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → plain listener (axum::serve)        → Transport::Plain
//!     → tls.rs (rustls handshake, axum-server) → Transport::Tls
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional; the gate works behind a terminating proxy too
//! - The listener, not the request, decides whether the transport is secure

pub mod tls;

pub use tls::{load_tls_config, TlsError};

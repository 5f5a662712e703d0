//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gate decisions produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (decision and trusted-header counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line for a request
//! - Metrics are cheap (atomic increments) and a no-op until installed

pub mod logging;
pub mod metrics;

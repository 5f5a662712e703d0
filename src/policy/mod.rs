//! Secure-origin policy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (any host adapter implementing RequestContext):
//!     → headers.rs (table of trusted-header conventions + normalizers)
//!     → evaluator.rs (OR native transport flag with enabled assertions)
//!     → Outcome::Pass | Outcome::Redirect | Outcome::Reject
//! ```
//!
//! # Design Decisions
//! - Fail closed: an absent, empty or malformed header never asserts https
//! - Every header convention is opt-in; untrusted headers are never read
//! - Policy is built once per mount and never mutated afterwards
//! - Evaluation is pure and synchronous, safe to share via Arc

pub mod context;
pub mod evaluator;
pub mod headers;

pub use context::{RequestContext, RequestSnapshot};
pub use evaluator::{Outcome, SecureOriginPolicy};
pub use headers::{HeaderKind, HeaderRule, HEADER_RULES};

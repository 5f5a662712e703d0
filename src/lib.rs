//! Secure-origin request gate.
//!
//! Decides per request whether it arrived over https, either directly or
//! as vouched for by an explicitly trusted proxy header, and redirects or
//! rejects the ones that did not.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod policy;

pub use config::schema::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use policy::{Outcome, RequestContext, SecureOriginPolicy};

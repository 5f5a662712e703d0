//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, Transport extension per listener)
//!     → request.rs (request ID, RequestContext view)
//!     → middleware/secure_origin.rs (policy decision per mount)
//!     → response.rs (301 / 403 / 400) or the mounted handler
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::secure_origin_middleware;
pub use request::{HttpRequestView, MakeRequestUuidV4, Transport, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};

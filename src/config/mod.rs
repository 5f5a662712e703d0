//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → one SecureOriginPolicy per mount, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a policy never changes under a mount
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GateConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::MountConfig;
pub use schema::ObservabilityConfig;
pub use schema::PolicyConfig;
pub use schema::TlsConfig;
pub use schema::TrustFlags;

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, addresses)
//! - Detect duplicate mounts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GateConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{address}' for {listener} listener")]
    InvalidBindAddress { listener: &'static str, address: String },

    #[error("TLS {field} must not be empty")]
    EmptyTlsPath { field: &'static str },

    #[error("mount path '{0}' must start with '/'")]
    MountPathNotAbsolute(String),

    #[error("mount path '{0}' uses ':' or '*' segments; use '{{name}}' captures")]
    LegacyMountSyntax(String),

    #[error("mount path '{0}' is declared more than once")]
    DuplicateMount(String),

    #[error("mount '{0}' has https_port 0")]
    ZeroHttpsPort(String),

    #[error("metrics address '{0}' is invalid")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            listener: "plain",
            address: config.listener.bind_address.clone(),
        });
    }

    if let Some(tls) = &config.listener.tls {
        if tls.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidBindAddress {
                listener: "tls",
                address: tls.bind_address.clone(),
            });
        }
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::EmptyTlsPath { field: "cert_path" });
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::EmptyTlsPath { field: "key_path" });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for mount in &config.mounts {
        if !mount.path.starts_with('/') {
            errors.push(ValidationError::MountPathNotAbsolute(mount.path.clone()));
        }
        if mount
            .path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            errors.push(ValidationError::LegacyMountSyntax(mount.path.clone()));
        }
        if !seen.insert(mount.path.as_str()) {
            errors.push(ValidationError::DuplicateMount(mount.path.clone()));
        }
        if mount.policy.https_port == 0 {
            errors.push(ValidationError::ZeroHttpsPort(mount.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MountConfig, PolicyConfig, TlsConfig};

    fn mount(path: &str) -> MountConfig {
        MountConfig {
            path: path.to_string(),
            policy: PolicyConfig::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GateConfig::default()), Ok(()));
    }

    #[test]
    fn detects_duplicate_and_relative_mounts() {
        let mut config = GateConfig::default();
        config.mounts = vec![mount("/a"), mount("/a"), mount("b"), mount("/users/:id")];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateMount("/a".into()),
                ValidationError::MountPathNotAbsolute("b".into()),
                ValidationError::LegacyMountSyntax("/users/:id".into()),
            ]
        );
    }

    #[test]
    fn checks_listener_addresses() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.tls = Some(TlsConfig {
            bind_address: "0.0.0.0:3043".into(),
            cert_path: " ".into(),
            key_path: "key.pem".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("localhost"));
        assert_eq!(errors[1], ValidationError::EmptyTlsPath { field: "cert_path" });
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = GateConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nope".into())]
        );
    }
}

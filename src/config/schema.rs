//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::policy::HeaderKind;

/// Root configuration for the secure-origin gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (plain and TLS bind addresses).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Paths guarded by a secure-origin policy.
    pub mounts: Vec<MountConfig>,
}

impl GateConfig {
    /// Policy configured for an exact mount path.
    pub fn mount(&self, path: &str) -> Option<&MountConfig> {
        self.mounts.iter().find(|m| m.path == path)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plain HTTP bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Optional TLS listener.
    pub tls: Option<TlsConfig>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            tls: None,
            request_timeout_secs: 30,
        }
    }
}

/// TLS listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// TLS bind address (e.g., "0.0.0.0:3043").
    #[serde(default = "default_tls_bind")]
    pub bind_address: String,

    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

fn default_tls_bind() -> String {
    "0.0.0.0:3043".to_string()
}

/// A path guarded by its own policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// Exact route path (e.g., "/rfc").
    pub path: String,

    /// Policy applied to requests on this path.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Secure-origin policy settings for one mount.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Port placed in redirect targets; omitted from the URL when 443.
    #[serde(alias = "httpsPort")]
    pub https_port: u16,

    /// Body of the 403 sent to insecure unsafe-method requests.
    #[serde(alias = "message")]
    pub rejection_message: String,

    /// Proxy header conventions treated as authoritative.
    pub trust: TrustFlags,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            https_port: 443,
            rejection_message: "Use HTTPS when submitting data".to_string(),
            trust: TrustFlags::default(),
        }
    }
}

/// Opt-in trust for proxy-supplied headers. Everything is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TrustFlags {
    /// `Forwarded` (RFC 7239).
    #[serde(alias = "allowRFCHeader")]
    pub rfc_forwarded: bool,

    /// `X-Forwarded-Proto` and `X-Forwarded-Ssl`, trusted together.
    #[serde(alias = "allowForwardForHeader")]
    pub forward_for: bool,

    /// `X-Real-Proto`.
    #[serde(alias = "allowNginxAltHeader")]
    pub nginx_alt: bool,

    /// `X-ARR-SSL`.
    #[serde(alias = "allowAzureHeader")]
    pub azure: bool,

    /// `Z-Forwarded-Proto`.
    #[serde(alias = "allowZscalerHeader")]
    pub zscaler: bool,

    /// `Fastly-SSL`.
    #[serde(alias = "allowFastlyHeader")]
    pub fastly: bool,
}

impl TrustFlags {
    /// Whether a single header convention is trusted.
    pub fn trusts(&self, kind: HeaderKind) -> bool {
        match kind {
            HeaderKind::RfcForwarded => self.rfc_forwarded,
            HeaderKind::ForwardedProto | HeaderKind::ForwardedSsl => self.forward_for,
            HeaderKind::NginxAlt => self.nginx_alt,
            HeaderKind::Azure => self.azure,
            HeaderKind::Zscaler => self.zscaler,
            HeaderKind::Fastly => self.fastly,
        }
    }

    /// Enabled conventions, in evaluation order.
    pub fn kinds(&self) -> Vec<HeaderKind> {
        HeaderKind::ALL
            .into_iter()
            .filter(|kind| self.trusts(*kind))
            .collect()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

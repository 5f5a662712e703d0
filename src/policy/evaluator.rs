//! Secure-origin decision.
//!
//! # Responsibilities
//! - Combine the transport's own security flag with trusted header assertions
//! - Redirect insecure safe methods to the https equivalent URL
//! - Reject insecure unsafe methods with the configured message
//! - Reject an insecure GET/HEAD with no host as 400 "Missing Host header",
//!   since there is no URL to redirect it to
//!
//! # Design Decisions
//! - Pure function of (policy, request): no I/O, no shared mutable state
//! - Only headers enabled at construction are ever consulted
//! - Port 443 is omitted from redirect targets
//! - Redirect hosts are lowercased; ports are dropped, IPv6 brackets kept

use axum::http::{Method, StatusCode};

use crate::config::PolicyConfig;
use crate::policy::context::RequestContext;
use crate::policy::headers::HeaderKind;

/// Status used for insecure GET/HEAD requests.
pub const REDIRECT_STATUS: StatusCode = StatusCode::MOVED_PERMANENTLY;

/// Status used for insecure requests with any other method.
pub const REJECT_STATUS: StatusCode = StatusCode::FORBIDDEN;

const DEFAULT_HTTPS_PORT: u16 = 443;

/// Decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Secure origin: hand the request to the next stage unchanged.
    Pass,
    /// Insecure safe method: answer 301 with this `Location`.
    Redirect(String),
    /// Insecure request that cannot be redirected.
    Reject { status: StatusCode, message: String },
}

impl Outcome {
    /// Response status for this outcome, `None` for `Pass`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Outcome::Pass => None,
            Outcome::Redirect(_) => Some(REDIRECT_STATUS),
            Outcome::Reject { status, .. } => Some(*status),
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Redirect(_) => "redirect",
            Outcome::Reject { .. } => "reject",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Immutable policy for one mount point.
#[derive(Debug, Clone)]
pub struct SecureOriginPolicy {
    https_port: u16,
    rejection_message: String,
    trusted: Vec<HeaderKind>,
}

impl SecureOriginPolicy {
    /// Build the policy from its configuration.
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            https_port: config.https_port,
            rejection_message: config.rejection_message.clone(),
            trusted: config.trust.kinds(),
        }
    }

    /// Header conventions this policy trusts, in evaluation order.
    pub fn trusted(&self) -> &[HeaderKind] {
        &self.trusted
    }

    pub fn https_port(&self) -> u16 {
        self.https_port
    }

    pub fn rejection_message(&self) -> &str {
        &self.rejection_message
    }

    /// First trusted header that asserts https, if any.
    pub fn trusted_assertion<C: RequestContext + ?Sized>(&self, ctx: &C) -> Option<HeaderKind> {
        self.trusted
            .iter()
            .copied()
            .find(|kind| kind.asserts_https(ctx.header(kind.header_name()).as_deref()))
    }

    /// Whether the request is to be treated as having a secure origin.
    pub fn is_secure<C: RequestContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.transport_is_secure() || self.trusted_assertion(ctx).is_some()
    }

    /// Build the https URL equivalent to `host` + `path_and_query`.
    pub fn redirect_target(&self, host: &str, path_and_query: &str) -> String {
        let hostname = hostname(host).to_ascii_lowercase();
        if self.https_port == DEFAULT_HTTPS_PORT {
            format!("https://{}{}", hostname, path_and_query)
        } else {
            format!("https://{}:{}{}", hostname, self.https_port, path_and_query)
        }
    }

    /// Decide what to do with a request.
    pub fn evaluate<C: RequestContext + ?Sized>(&self, ctx: &C) -> Outcome {
        if self.is_secure(ctx) {
            return Outcome::Pass;
        }

        let method = ctx.method();
        if *method != Method::GET && *method != Method::HEAD {
            return Outcome::Reject {
                status: REJECT_STATUS,
                message: self.rejection_message.clone(),
            };
        }

        match ctx.host().filter(|h| !h.is_empty()) {
            Some(host) => Outcome::Redirect(self.redirect_target(host, ctx.path_and_query())),
            None => Outcome::Reject {
                status: StatusCode::BAD_REQUEST,
                message: "Missing Host header".to_string(),
            },
        }
    }
}

impl Default for SecureOriginPolicy {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}

/// Strip an optional port from a host, keeping IPv6 brackets.
fn hostname(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}

//! Trusted proxy header conventions.
//!
//! Each [`HeaderKind`] pairs one header name with one normalizer that
//! answers a single question: does this raw value assert that the request
//! was https at the edge? Normalizers are total functions over
//! `Option<&str>`; anything unexpected maps to `false`.
//!
//! Adding a vendor convention means adding a variant and one entry in
//! [`HEADER_RULES`].

use serde::{Deserialize, Serialize};

/// A proxy-supplied header convention that can vouch for a secure origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderKind {
    /// RFC 7239 `Forwarded: for=...; proto=https; by=...`.
    RfcForwarded,
    /// De-facto `X-Forwarded-Proto: https`.
    ForwardedProto,
    /// `X-Forwarded-Ssl: on`.
    ForwardedSsl,
    /// nginx-style `X-Real-Proto: https`.
    NginxAlt,
    /// Azure ARR `X-ARR-SSL: <certificate info>`.
    Azure,
    /// Zscaler `Z-Forwarded-Proto: https`.
    Zscaler,
    /// Fastly `Fastly-SSL: 1`.
    Fastly,
}

impl HeaderKind {
    /// All known conventions, in evaluation order.
    pub const ALL: [HeaderKind; 7] = [
        HeaderKind::RfcForwarded,
        HeaderKind::ForwardedProto,
        HeaderKind::ForwardedSsl,
        HeaderKind::NginxAlt,
        HeaderKind::Azure,
        HeaderKind::Zscaler,
        HeaderKind::Fastly,
    ];

    /// The table entry for this convention.
    pub fn rule(self) -> &'static HeaderRule {
        // HEADER_RULES is laid out in the same order as ALL.
        &HEADER_RULES[self as usize]
    }

    /// Header name this convention is carried in (lowercase).
    pub fn header_name(self) -> &'static str {
        self.rule().header
    }

    /// Normalize a raw header value for this convention.
    pub fn asserts_https(self, raw: Option<&str>) -> bool {
        (self.rule().normalize)(raw)
    }
}

impl std::fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HeaderKind::RfcForwarded => "rfc-forwarded",
            HeaderKind::ForwardedProto => "forwarded-proto",
            HeaderKind::ForwardedSsl => "forwarded-ssl",
            HeaderKind::NginxAlt => "nginx-alt",
            HeaderKind::Azure => "azure",
            HeaderKind::Zscaler => "zscaler",
            HeaderKind::Fastly => "fastly",
        };
        f.write_str(name)
    }
}

/// One row of the normalizer table.
pub struct HeaderRule {
    pub kind: HeaderKind,
    pub header: &'static str,
    pub normalize: fn(Option<&str>) -> bool,
}

impl std::fmt::Debug for HeaderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderRule")
            .field("kind", &self.kind)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Header conventions indexed by `HeaderKind as usize`.
pub static HEADER_RULES: [HeaderRule; 7] = [
    HeaderRule {
        kind: HeaderKind::RfcForwarded,
        header: "forwarded",
        normalize: rfc_forwarded_is_https,
    },
    HeaderRule {
        kind: HeaderKind::ForwardedProto,
        header: "x-forwarded-proto",
        normalize: is_https_token,
    },
    HeaderRule {
        kind: HeaderKind::ForwardedSsl,
        header: "x-forwarded-ssl",
        normalize: is_on_token,
    },
    HeaderRule {
        kind: HeaderKind::NginxAlt,
        header: "x-real-proto",
        normalize: is_https_token,
    },
    HeaderRule {
        kind: HeaderKind::Azure,
        header: "x-arr-ssl",
        normalize: is_present,
    },
    HeaderRule {
        kind: HeaderKind::Zscaler,
        header: "z-forwarded-proto",
        normalize: is_https_token,
    },
    HeaderRule {
        kind: HeaderKind::Fastly,
        header: "fastly-ssl",
        normalize: is_fastly_ssl,
    },
];

/// Exact, case-sensitive `https`.
fn is_https_token(raw: Option<&str>) -> bool {
    raw == Some("https")
}

fn is_on_token(raw: Option<&str>) -> bool {
    raw == Some("on")
}

/// Any non-empty value counts; ARR puts certificate details here.
fn is_present(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| !v.is_empty())
}

fn is_fastly_ssl(raw: Option<&str>) -> bool {
    matches!(raw, Some("1") | Some("true"))
}

fn rfc_forwarded_is_https(raw: Option<&str>) -> bool {
    raw.and_then(forwarded_proto) == Some("https")
}

/// Extract the `proto` parameter from an RFC 7239 `Forwarded` value.
///
/// Pairs are `;`-separated with optional whitespace around the separator.
/// A pair's value runs from its first `=` up to the next `=` (or the end),
/// so `proto=https=x` reads as `https`. Returns `None` for an empty value
/// or if any pair lacks an `=`; the last `proto` wins when it repeats.
pub fn forwarded_proto(raw: &str) -> Option<&str> {
    if raw.is_empty() {
        return None;
    }

    let segments: Vec<&str> = raw.split(';').collect();
    let last = segments.len() - 1;
    let mut proto = None;

    for (i, segment) in segments.into_iter().enumerate() {
        // Whitespace is only insignificant next to a separator.
        let mut segment = segment;
        if i > 0 {
            segment = segment.trim_start();
        }
        if i < last {
            segment = segment.trim_end();
        }

        let mut parts = segment.split('=');
        let key = parts.next()?;
        let value = parts.next()?;
        if key == "proto" {
            proto = Some(value);
        }
    }

    proto
}

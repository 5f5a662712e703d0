//! Request capability consumed by the policy evaluator.
//!
//! The evaluator never sees a framework request type. Hosts expose the
//! handful of attributes it needs through [`RequestContext`]; the axum
//! adapter lives in `crate::http::request`, and [`RequestSnapshot`] is an
//! owned form used by the CLI and tests.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// Read-only view of one inbound request.
pub trait RequestContext {
    /// HTTP method.
    fn method(&self) -> &Method;

    /// Whether the connection this request arrived on is already encrypted.
    fn transport_is_secure(&self) -> bool;

    /// Effective host as received, possibly with a port.
    fn host(&self) -> Option<&str>;

    /// Original path including the query string.
    fn path_and_query(&self) -> &str;

    /// Scheme as seen by this hop. Informational only.
    fn scheme(&self) -> &str {
        if self.transport_is_secure() {
            "https"
        } else {
            "http"
        }
    }

    /// Raw value of a header, looked up by lowercase name.
    ///
    /// Repeated headers are folded into one value joined with `", "`, so a
    /// second copy can never be hidden behind the first. Returns `None` when
    /// the header is absent or any copy is not valid visible ASCII.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Owned description of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSnapshot {
    #[serde(with = "method_serde")]
    pub method: Method,
    pub secure: bool,
    pub host: Option<String>,
    pub path_and_query: String,
    /// Header values keyed by lowercase name.
    pub headers: HashMap<String, String>,
}

impl RequestSnapshot {
    /// A plain-transport request with no headers.
    pub fn new(method: Method, host: impl Into<String>, path_and_query: impl Into<String>) -> Self {
        Self {
            method,
            secure: false,
            host: Some(host.into()),
            path_and_query: path_and_query.into(),
            headers: HashMap::new(),
        }
    }

    /// Mark the transport as encrypted.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Add a header. Names are stored lowercase; a repeated name replaces the value.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn without_host(mut self) -> Self {
        self.host = None;
        self
    }
}

impl RequestContext for RequestSnapshot {
    fn method(&self) -> &Method {
        &self.method
    }

    fn transport_is_secure(&self) -> bool {
        self.secure
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

mod method_serde {
    use axum::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let raw = String::deserialize(d)?;
        Method::from_bytes(raw.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lowercases_header_names() {
        let req = RequestSnapshot::new(Method::GET, "example.com", "/")
            .with_header("X-Forwarded-Proto", "https");
        assert_eq!(req.header("x-forwarded-proto").as_deref(), Some("https"));
        assert_eq!(req.header("forwarded"), None);
    }

    #[test]
    fn scheme_follows_transport() {
        let req = RequestSnapshot::new(Method::GET, "example.com", "/");
        assert_eq!(req.scheme(), "http");
        assert_eq!(req.with_secure(true).scheme(), "https");
    }

    #[test]
    fn snapshot_from_json() {
        let req: RequestSnapshot = serde_json::from_str(
            r#"{"method":"PUT","secure":false,"host":"a.test","path_and_query":"/x?y=1","headers":{}}"#,
        )
        .unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.path_and_query(), "/x?y=1");
    }
}

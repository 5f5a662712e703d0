//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) as early as possible
//! - Record which transport a request arrived on
//! - Expose an axum request to the policy through `RequestContext`
//!
//! # Design Decisions
//! - Transport security comes only from the listener, never from the
//!   request line (an absolute `https://` target is client-controlled)
//! - Header values that are not visible ASCII read as absent
//! - Repeated headers fold into one comma-joined value, never first-wins

use std::borrow::Cow;

use axum::extract::OriginalUri;
use axum::http::{header, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::policy::RequestContext;

/// Request ID header name.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Transport a request arrived on, inserted as an extension by the listener's router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Plain,
    Tls,
}

impl Transport {
    pub fn is_secure(self) -> bool {
        matches!(self, Transport::Tls)
    }
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request ID layer, if any.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Borrowed `RequestContext` over an axum request.
#[derive(Debug)]
pub struct HttpRequestView<'a, B> {
    request: &'a Request<B>,
    secure: bool,
}

impl<'a, B> HttpRequestView<'a, B> {
    pub fn new(request: &'a Request<B>) -> Self {
        let secure = request
            .extensions()
            .get::<Transport>()
            .is_some_and(|t| t.is_secure());
        Self { request, secure }
    }
}

impl<B> RequestContext for HttpRequestView<'_, B> {
    fn method(&self) -> &Method {
        self.request.method()
    }

    fn transport_is_secure(&self) -> bool {
        self.secure
    }

    fn host(&self) -> Option<&str> {
        // HTTP/2 carries the host in the :authority pseudo-header.
        self.request
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| self.request.uri().authority().map(|a| a.host()))
    }

    fn path_and_query(&self) -> &str {
        let uri = match self.request.extensions().get::<OriginalUri>() {
            Some(OriginalUri(original)) => original,
            None => self.request.uri(),
        };
        uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
    }

    fn scheme(&self) -> &str {
        if self.secure {
            "https"
        } else {
            self.request.uri().scheme_str().unwrap_or("http")
        }
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        let mut values = self.request.headers().get_all(name).iter();
        let first = values.next()?.to_str().ok()?;

        let mut folded: Option<String> = None;
        for value in values {
            let joined = folded.get_or_insert_with(|| first.to_string());
            joined.push_str(", ");
            joined.push_str(value.to_str().ok()?);
        }

        Some(match folded {
            Some(joined) => Cow::Owned(joined),
            None => Cow::Borrowed(first),
        })
    }
}

//! Secure-origin middleware.
//! Enforces https (directly or via trusted proxy headers) on a mounted route.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::{request_id, HttpRequestView};
use crate::http::response::outcome_response;
use crate::observability::metrics;
use crate::policy::{RequestContext, SecureOriginPolicy};

pub async fn secure_origin_middleware(
    State(policy): State<Arc<SecureOriginPolicy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let outcome = {
        let view = HttpRequestView::new(&request);
        let outcome = policy.evaluate(&view);

        if outcome.is_pass() && !view.transport_is_secure() {
            if let Some(kind) = policy.trusted_assertion(&view) {
                tracing::trace!(
                    request_id = %request_id(&request),
                    header = kind.header_name(),
                    "Trusted proxy header asserted https"
                );
                metrics::record_trusted_header(kind);
            }
        }

        if !outcome.is_pass() {
            tracing::debug!(
                request_id = %request_id(&request),
                method = %view.method(),
                scheme = view.scheme(),
                host = ?view.host(),
                path = view.path_and_query(),
                outcome = outcome.label(),
                status = ?outcome.status(),
                "Insecure request stopped at gate"
            );
        }

        outcome
    };

    metrics::record_decision(outcome.label(), request.method().as_str());

    match outcome_response(outcome) {
        Some(response) => response,
        None => next.run(request).await,
    }
}

//! Response handling and transformation.
//!
//! # Responsibilities
//! - Map a non-pass policy outcome to an HTTP response
//!
//! # Design Decisions
//! - Redirects are 301 with `Location` (not axum's 308 `Redirect::permanent`)
//! - Rejections carry the configured message as a plain-text body

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::policy::evaluator::{Outcome, REDIRECT_STATUS};

/// Response for an outcome; `None` means the request continues down the stack.
pub fn outcome_response(outcome: Outcome) -> Option<Response> {
    match outcome {
        Outcome::Pass => None,
        Outcome::Redirect(location) => {
            Some((REDIRECT_STATUS, [(header::LOCATION, location)]).into_response())
        }
        Outcome::Reject { status, message } => Some((status, message).into_response()),
    }
}

/// Plain 404 for paths with no mount.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_has_no_response() {
        assert!(outcome_response(Outcome::Pass).is_none());
    }

    #[test]
    fn redirect_is_301_with_location() {
        let res = outcome_response(Outcome::Redirect("https://example.com:3043/".into())).unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "https://example.com:3043/");
    }

    #[test]
    fn reject_carries_status_and_text() {
        let res = outcome_response(Outcome::Reject {
            status: StatusCode::FORBIDDEN,
            message: "Use HTTPS when submitting data".into(),
        })
        .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}

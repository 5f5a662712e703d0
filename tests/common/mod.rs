//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use secure_gate::config::{GateConfig, MountConfig, PolicyConfig, TrustFlags};
use tower::ServiceExt;

/// Host header sent by test requests, as a plain listener on :3000 would see it.
pub const TEST_HOST: &str = "127.0.0.1:3000";

/// HTTPS port every demo mount redirects to.
pub const HTTPS_PORT: u16 = 3043;

pub const CUSTOM_MESSAGE: &str = "This is a test error message";

fn mount(path: &str, policy: PolicyConfig) -> MountConfig {
    MountConfig {
        path: path.to_string(),
        policy,
    }
}

fn trusting(trust: TrustFlags) -> PolicyConfig {
    PolicyConfig {
        https_port: HTTPS_PORT,
        trust,
        ..Default::default()
    }
}

/// One mount per trust flag, plus a default and a custom-message mount.
pub fn demo_config() -> GateConfig {
    let mut config = GateConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.mounts = vec![
        mount("/", trusting(TrustFlags::default())),
        mount(
            "/message",
            PolicyConfig {
                https_port: HTTPS_PORT,
                rejection_message: CUSTOM_MESSAGE.to_string(),
                ..Default::default()
            },
        ),
        mount("/proto", trusting(TrustFlags { forward_for: true, ..Default::default() })),
        mount("/rfc", trusting(TrustFlags { rfc_forwarded: true, ..Default::default() })),
        mount("/nginx", trusting(TrustFlags { nginx_alt: true, ..Default::default() })),
        mount("/azure", trusting(TrustFlags { azure: true, ..Default::default() })),
        mount("/zscaler", trusting(TrustFlags { zscaler: true, ..Default::default() })),
        mount("/fastly", trusting(TrustFlags { fastly: true, ..Default::default() })),
    ];
    config
}

/// Send one request through a router.
pub async fn send(
    router: &Router,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("Host", TEST_HOST);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

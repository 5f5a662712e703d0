//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build one immutable `SecureOriginPolicy` per configured mount
//! - Create the Axum Router: guarded mounts plus an unguarded 404 fallback
//! - Wire up middleware (tracing, timeout, request ID, transport marker)
//! - Serve plain HTTP and, when configured, TLS with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::any,
    Extension, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::http::middleware::secure_origin_middleware;
use crate::http::request::{MakeRequestUuidV4, Transport};
use crate::http::response::not_found;
use crate::lifecycle::Shutdown;
use crate::net::tls::{load_tls_config, TlsError};
use crate::policy::SecureOriginPolicy;

/// Time allowed for in-flight TLS connections to finish after shutdown.
const TLS_DRAIN_SECS: u64 = 10;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// A route path with the policy guarding it.
#[derive(Debug, Clone)]
struct Mount {
    path: String,
    policy: Arc<SecureOriginPolicy>,
}

/// HTTP server hosting the gated mounts.
pub struct HttpServer {
    config: GateConfig,
    mounts: Vec<Mount>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GateConfig) -> Self {
        let mounts = config
            .mounts
            .iter()
            .map(|mount| {
                let policy = Arc::new(SecureOriginPolicy::new(&mount.policy));
                tracing::debug!(
                    path = %mount.path,
                    https_port = policy.https_port(),
                    trusted = ?policy.trusted(),
                    "Mount configured"
                );
                Mount {
                    path: mount.path.clone(),
                    policy,
                }
            })
            .collect();

        Self { config, mounts }
    }

    /// Build the Axum router for one listener.
    #[allow(deprecated)]
    pub fn router(&self, transport: Transport) -> Router {
        let mut router = Router::new();
        for mount in &self.mounts {
            router = router.route(
                &mount.path,
                any(mounted_handler).layer(middleware::from_fn_with_state(
                    mount.policy.clone(),
                    secure_origin_middleware,
                )),
            );
        }

        router
            .fallback(not_found)
            .layer(Extension(transport))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        &self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, transport = "plain", "HTTP server starting");

        axum::serve(listener, self.router(Transport::Plain))
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `listener` until `shutdown` fires.
    pub async fn run_tls(
        &self,
        listener: std::net::TcpListener,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;
        tracing::info!(address = %addr, transport = "tls", "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        axum_server::from_tcp_rustls(listener, tls)
            .handle(handle)
            .serve(self.router(Transport::Tls).into_make_service())
            .await?;

        tracing::info!(address = %addr, "HTTPS server stopped");
        Ok(())
    }

    /// Bind the configured listeners and serve until shutdown.
    pub async fn serve(self, shutdown: &Shutdown) -> Result<(), ServerError> {
        let bind_address = self.config.listener.bind_address.clone();
        let plain = TcpListener::bind(&bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                address: bind_address.clone(),
                source,
            })?;

        let Some(tls_config) = self.config.listener.tls.clone() else {
            return self.run(plain, shutdown.subscribe()).await;
        };

        let rustls = load_tls_config(&tls_config).await?;
        let secure = std::net::TcpListener::bind(&tls_config.bind_address).map_err(|source| {
            ServerError::Bind {
                address: tls_config.bind_address.clone(),
                source,
            }
        })?;

        tokio::try_join!(
            self.run(plain, shutdown.subscribe()),
            self.run_tls(secure, rustls, shutdown.subscribe()),
        )?;
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

/// Handler behind every mount: reaching it means the gate passed the request.
async fn mounted_handler() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MountConfig, PolicyConfig};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn config_with_mounts(paths: &[&str]) -> GateConfig {
        let mut config = GateConfig::default();
        config.mounts = paths
            .iter()
            .map(|path| MountConfig {
                path: path.to_string(),
                policy: PolicyConfig::default(),
            })
            .collect();
        config
    }

    #[tokio::test]
    async fn router_builds_with_mounts() {
        let server = HttpServer::new(config_with_mounts(&["/", "/a", "/b/{id}"]));

        for transport in [Transport::Plain, Transport::Tls] {
            let res = server
                .router(transport)
                .oneshot(
                    Request::builder()
                        .uri("/b/7")
                        .header("Host", "example.com")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let expected = if transport.is_secure() {
                StatusCode::OK
            } else {
                StatusCode::MOVED_PERMANENTLY
            };
            assert_eq!(res.status(), expected);
        }
    }

    #[tokio::test]
    async fn fallback_is_not_gated() {
        let server = HttpServer::new(config_with_mounts(&["/a"]));
        let res = server
            .router(Transport::Plain)
            .oneshot(Request::builder().method("POST").uri("/other").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::TlsConfig;

/// Error type for TLS setup.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("{kind} file not found: {path:?}")]
    MissingFile { kind: &'static str, path: PathBuf },

    #[error("failed to load TLS material: {0}")]
    Load(#[from] std::io::Error),
}

fn require_file(kind: &'static str, path: &Path) -> Result<(), TlsError> {
    if path.exists() {
        Ok(())
    } else {
        Err(TlsError::MissingFile {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Load rustls configuration from the PEM certificate and key named in `config`.
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    let cert_path = Path::new(&config.cert_path);
    let key_path = Path::new(&config.key_path);

    require_file("Certificate", cert_path)?;
    require_file("Private key", key_path)?;

    let rustls = RustlsConfig::from_pem_file(cert_path, key_path).await?;
    tracing::debug!(cert = ?cert_path, "TLS configuration loaded");
    Ok(rustls)
}

use std::path::PathBuf;

use axum::http::Method;
use clap::Parser;
use serde_json::json;

use secure_gate::config::{load_config, PolicyConfig, TrustFlags};
use secure_gate::policy::{Outcome, RequestSnapshot, SecureOriginPolicy};

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Evaluate a secure-origin policy against a described request", long_about = None)]
struct Cli {
    /// Load the policy of a mount from this configuration file.
    #[arg(short, long, requires = "mount")]
    config: Option<PathBuf>,

    /// Mount path whose policy to use (with --config).
    #[arg(long)]
    mount: Option<String>,

    #[arg(short, long, default_value = "GET")]
    method: String,

    #[arg(long, default_value = "localhost")]
    host: String,

    /// Path and query string.
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Treat the transport itself as TLS.
    #[arg(long)]
    secure: bool,

    /// Request header as 'Name: value'. Repeatable.
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    #[arg(long, default_value_t = 443)]
    https_port: u16,

    #[arg(long)]
    message: Option<String>,

    #[arg(long)]
    trust_rfc: bool,
    #[arg(long)]
    trust_forward_for: bool,
    #[arg(long)]
    trust_nginx: bool,
    #[arg(long)]
    trust_azure: bool,
    #[arg(long)]
    trust_zscaler: bool,
    #[arg(long)]
    trust_fastly: bool,
}

impl Cli {
    fn policy_config(&self) -> Result<PolicyConfig, Box<dyn std::error::Error>> {
        if let (Some(path), Some(mount)) = (&self.config, &self.mount) {
            let config = load_config(path)?;
            let mount = config
                .mount(mount)
                .ok_or_else(|| format!("no mount '{}' in {}", mount, path.display()))?;
            return Ok(mount.policy.clone());
        }

        let mut policy = PolicyConfig {
            https_port: self.https_port,
            trust: TrustFlags {
                rfc_forwarded: self.trust_rfc,
                forward_for: self.trust_forward_for,
                nginx_alt: self.trust_nginx,
                azure: self.trust_azure,
                zscaler: self.trust_zscaler,
                fastly: self.trust_fastly,
            },
            ..Default::default()
        };
        if let Some(message) = &self.message {
            policy.rejection_message = message.clone();
        }
        Ok(policy)
    }

    fn request(&self) -> Result<RequestSnapshot, Box<dyn std::error::Error>> {
        let method = Method::from_bytes(self.method.as_bytes())?;
        let mut request = RequestSnapshot::new(method, &self.host, &self.path).with_secure(self.secure);
        for raw in &self.headers {
            let (name, value) = raw
                .split_once(':')
                .ok_or_else(|| format!("header '{}' is not 'Name: value'", raw))?;
            request = request.with_header(name.trim(), value.trim_start());
        }
        Ok(request)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let policy = SecureOriginPolicy::new(&cli.policy_config()?);
    let request = cli.request()?;

    let outcome = policy.evaluate(&request);
    let trusted_by = policy
        .trusted_assertion(&request)
        .filter(|_| !request.secure)
        .map(|kind| kind.to_string());

    let report = match &outcome {
        Outcome::Pass => json!({ "outcome": "pass", "trusted_header": trusted_by }),
        Outcome::Redirect(location) => json!({
            "outcome": "redirect",
            "status": outcome.status().map(|s| s.as_u16()),
            "location": location,
        }),
        Outcome::Reject { status, message } => json!({
            "outcome": "reject",
            "status": status.as_u16(),
            "message": message,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use trojan_exporter_core::error::{ExporterError, Result};

use super::cli::Args;

/// Paths served by fixed ops handlers; the scrape path must not shadow them.
const RESERVED_PATHS: [&str; 2] = ["/metrics", "/healthz"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// `[ADDR]:PORT`; an empty address binds all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Trojan-Go API endpoint, `HOST:PORT`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_scrape_timeout_secs")]
    pub scrape_timeout_secs: u64,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            endpoint: default_endpoint(),
            scrape_timeout_secs: default_scrape_timeout_secs(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=300).contains(&self.scrape_timeout_secs) {
            return Err(ExporterError::Config(
                "scrape_timeout_secs must be between 1 and 300".into(),
            ));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(ExporterError::Config("metrics_path must start with '/'".into()));
        }
        if RESERVED_PATHS.contains(&self.metrics_path.as_str()) {
            return Err(ExporterError::Config(format!(
                "metrics_path {} is reserved",
                self.metrics_path
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ExporterError::Config("endpoint must not be empty".into()));
        }
        self.listen_addr()?;
        Ok(())
    }

    /// Flags and env vars win over file values.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(listen) = &args.listen {
            self.listen = listen.clone();
        }
        if let Some(path) = &args.metrics_path {
            self.metrics_path = path.clone();
        }
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = args.scrape_timeout {
            self.scrape_timeout_secs = secs;
        }
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let listen = if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        };
        listen
            .parse()
            .map_err(|e| ExporterError::Config(format!("invalid listen address {}: {e}", self.listen)))
    }
}

fn default_listen() -> String {
    ":9550".into()
}
fn default_metrics_path() -> String {
    "/scrape".into()
}
fn default_endpoint() -> String {
    "127.0.0.1:10000".into()
}
fn default_scrape_timeout_secs() -> u64 {
    3
}

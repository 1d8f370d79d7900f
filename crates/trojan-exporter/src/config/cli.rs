//! Command-line flags. Every setting is optional here so that unset flags
//! fall through to the config file and then to built-in defaults.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(name = "trojan-exporter", version, about = "Prometheus exporter for Trojan-Go user traffic")]
pub struct Args {
    /// YAML config file
    #[arg(short = 'c', long, env = "TROJAN_EXPORTER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Listen address [default: :9550]
    #[arg(short = 'l', long, env = "TROJAN_EXPORTER_LISTEN", value_name = "[ADDR]:PORT")]
    pub listen: Option<String>,

    /// Scrape path [default: /scrape]
    #[arg(short = 'm', long, env = "TROJAN_EXPORTER_METRICS_PATH", value_name = "PATH")]
    pub metrics_path: Option<String>,

    /// Trojan-Go API endpoint [default: 127.0.0.1:10000]
    #[arg(short = 'e', long = "trojan-go-endpoint", env = "TROJAN_EXPORTER_ENDPOINT", value_name = "HOST:PORT")]
    pub endpoint: Option<String>,

    /// Timeout in seconds for every individual scrape [default: 3]
    #[arg(short = 't', long = "scrape-timeout", env = "TROJAN_EXPORTER_SCRAPE_TIMEOUT", value_name = "N")]
    pub scrape_timeout: Option<u64>,
}

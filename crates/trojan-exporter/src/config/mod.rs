//! Exporter config loader.
//!
//! Layering: built-in defaults, then the optional YAML file (strict parsing),
//! then env vars and flags.

pub mod cli;
pub mod schema;

use std::fs;
use std::path::Path;

use trojan_exporter_core::error::{ExporterError, Result};

pub use cli::Args;
pub use schema::ExporterConfig;

/// Validated once, after flags are applied, so a flag can fix a bad file value.
pub fn load(args: &Args) -> Result<ExporterConfig> {
    let mut cfg = match &args.config {
        Some(path) => parse(&read(path)?)?,
        None => ExporterConfig::default(),
    };
    cfg.apply_overrides(args);
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &Path) -> Result<ExporterConfig> {
    load_from_str(&read(path)?)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ExporterError::Config(format!("read config {} failed: {e}", path.display()))
    })
}

/// Strict parsing only; no range checks.
fn parse(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| ExporterError::Config(format!("invalid yaml: {e}")))
}

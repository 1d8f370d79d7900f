//! Shared application state for the exporter.
//!
//! The collector is built once here and injected into the router; handlers
//! never reach for process-wide globals.

use std::sync::Arc;

use trojan_exporter_core::error::Result;

use crate::config::ExporterConfig;
use crate::exporter::Exporter;
use crate::obs::ExporterMetrics;
use crate::upstream::{GrpcUserSource, UserSource};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    exporter: Exporter,
    metrics: Arc<ExporterMetrics>,
}

impl AppState {
    /// Build state against the configured Trojan-Go endpoint.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let source = GrpcUserSource::new(cfg.endpoint.clone(), cfg.scrape_timeout());
        Self::with_source(cfg, Arc::new(source))
    }

    /// Build state around an arbitrary user source.
    pub fn with_source(cfg: ExporterConfig, source: Arc<dyn UserSource>) -> Result<Self> {
        let metrics = Arc::new(ExporterMetrics::new()?);
        let exporter = Exporter::new(source, cfg.scrape_timeout(), Arc::clone(&metrics))?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                exporter,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn exporter(&self) -> &Exporter {
        &self.inner.exporter
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }
}

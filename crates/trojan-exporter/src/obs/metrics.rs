//! Self metrics registry backed by the `prometheus` crate.
//!
//! A dedicated `Registry` is owned by `AppState` instead of the global default
//! registry, so tests can build as many independent instances as they need.

use std::time::Duration;

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

use trojan_exporter_core::error::{ErrorKind, ExporterError, Result};

const NAMESPACE: &str = "trojan_exporter";

// Upper bounds in seconds; the default scrape timeout is 3s.
const SCRAPE_BUCKETS: [f64; 10] = [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

fn internal(e: prometheus::Error) -> ExporterError {
    ExporterError::Internal(format!("metrics registry: {e}"))
}

pub struct ExporterMetrics {
    registry: Registry,
    http_requests: IntCounterVec,
    scrape_duration: Histogram,
    scrape_errors: IntCounterVec,
}

impl ExporterMetrics {
    /// Create the registry and register every self metric.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests served by path and status")
                .namespace(NAMESPACE),
            &["path", "status"],
        )
        .map_err(internal)?;
        registry
            .register(Box::new(http_requests.clone()))
            .map_err(internal)?;

        let scrape_duration = Histogram::with_opts(
            HistogramOpts::new(
                "scrape_duration_seconds",
                "Duration of upstream scrapes, failed ones included",
            )
            .namespace(NAMESPACE)
            .buckets(SCRAPE_BUCKETS.to_vec()),
        )
        .map_err(internal)?;
        registry
            .register(Box::new(scrape_duration.clone()))
            .map_err(internal)?;

        let scrape_errors = IntCounterVec::new(
            Opts::new("scrape_errors_total", "Failed upstream scrapes by error kind")
                .namespace(NAMESPACE),
            &["kind"],
        )
        .map_err(internal)?;
        registry
            .register(Box::new(scrape_errors.clone()))
            .map_err(internal)?;

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .map_err(internal)?;

        Ok(Self {
            registry,
            http_requests,
            scrape_duration,
            scrape_errors,
        })
    }

    /// Count one served HTTP request.
    pub fn record_request(&self, path: &str, status: u16) {
        self.http_requests
            .with_label_values(&[path, status.to_string().as_str()])
            .inc();
    }

    /// Record the wall time of one scrape attempt.
    pub fn observe_scrape(&self, elapsed: Duration) {
        self.scrape_duration.observe(elapsed.as_secs_f64());
    }

    pub fn record_scrape_error(&self, kind: ErrorKind) {
        self.scrape_errors.with_label_values(&[kind.as_str()]).inc();
    }

    /// Number of failed scrapes recorded for `kind`.
    pub fn scrape_errors(&self, kind: ErrorKind) -> u64 {
        self.scrape_errors.with_label_values(&[kind.as_str()]).get()
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .map_err(internal)
    }
}

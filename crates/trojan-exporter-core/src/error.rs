//! Shared error type across trojan-exporter crates.

use std::time::Duration;

use thiserror::Error;

/// Stable error categories, used as log fields and metric label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream connection could not be established.
    Dial,
    /// The enumeration call was rejected by the upstream.
    Rpc,
    /// The response stream broke before end-of-stream.
    StreamReceive,
    /// The scrape deadline expired.
    ScrapeTimeout,
    /// A sample could not be built from its descriptor.
    MetricConstruction,
    /// Invalid configuration.
    Config,
    /// Internal failure.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Dial => "dial",
            ErrorKind::Rpc => "rpc",
            ErrorKind::StreamReceive => "stream_receive",
            ErrorKind::ScrapeTimeout => "scrape_timeout",
            ErrorKind::MetricConstruction => "metric_construction",
            ErrorKind::Config => "config",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Boxed underlying cause, so the core stays transport-agnostic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("failed to dial: {source}, timeout: {timeout:?}")]
    Dial {
        #[source]
        source: BoxError,
        timeout: Duration,
    },
    #[error("list users failed: {0}")]
    Rpc(String),
    #[error("stream receive failed: {0}")]
    StreamReceive(String),
    #[error("scrape timed out after {0:?}")]
    ScrapeTimeout(Duration),
    #[error("metric construction failed: {0}")]
    MetricConstruction(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Build a dial error from any underlying cause.
    pub fn dial(source: impl Into<BoxError>, timeout: Duration) -> Self {
        ExporterError::Dial {
            source: source.into(),
            timeout,
        }
    }

    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Dial { .. } => ErrorKind::Dial,
            ExporterError::Rpc(_) => ErrorKind::Rpc,
            ExporterError::StreamReceive(_) => ErrorKind::StreamReceive,
            ExporterError::ScrapeTimeout(_) => ErrorKind::ScrapeTimeout,
            ExporterError::MetricConstruction(_) => ErrorKind::MetricConstruction,
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}

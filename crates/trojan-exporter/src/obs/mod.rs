//! In-process self metrics of the exporter.
//!
//! These describe the exporter itself (HTTP traffic, scrape latency, upstream
//! failures, process stats) and are served on `/metrics`, separate from the
//! per-user series produced on the scrape path.

pub mod metrics;

pub use metrics::ExporterMetrics;

//! Scrape collector: pulls user statuses from the upstream and turns them
//! into `trojan_go_*` metric families.
//!
//! Scrapes are serialized by an async mutex held across the whole upstream
//! round trip and translation. Failures never escape `collect`; they only
//! shrink the result to the scrape counter.

pub mod family;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use prometheus::core::{Collector, Desc};
use prometheus::proto::{MetricFamily, MetricType};
use prometheus::{IntCounter, Opts};
use tokio::sync::Mutex;
use tokio::time::Instant;

use trojan_exporter_core::error::{ExporterError, Result};
use trojan_exporter_core::model::UserStatusRecord;

use crate::obs::ExporterMetrics;
use crate::upstream::UserSource;

use family::Families;

/// Prefix of every exported metric.
pub const NAMESPACE: &str = "trojan_go";

/// Label carrying the user identifier.
pub const TARGET_LABEL: &str = "target";

pub const UPLOAD_TRAFFIC: &str = "upload_traffic_bytes_total";
pub const DOWNLOAD_TRAFFIC: &str = "download_traffic_bytes_total";
pub const CURRENT_UPLOAD_SPEED: &str = "current_upload_speed";
pub const CURRENT_DOWNLOAD_SPEED: &str = "current_download_speed";
pub const SCRAPE_DURATION: &str = "scrape_duration_seconds";

// (key, help, labels)
const DESCRIPTORS: [(&str, &str, &[&str]); 5] = [
    (SCRAPE_DURATION, "Scrape duration in seconds", &[]),
    (UPLOAD_TRAFFIC, "Number of transmitted bytes", &[TARGET_LABEL]),
    (DOWNLOAD_TRAFFIC, "Number of received bytes", &[TARGET_LABEL]),
    (CURRENT_UPLOAD_SPEED, "Number of current upload speed bytes", &[TARGET_LABEL]),
    (CURRENT_DOWNLOAD_SPEED, "Number of current download speed bytes", &[TARGET_LABEL]),
];

/// Fully-qualified metric name for `key`.
pub fn fq_name(key: &str) -> String {
    format!("{NAMESPACE}_{key}")
}

pub struct Exporter {
    source: Arc<dyn UserSource>,
    scrape_timeout: Duration,
    descriptors: BTreeMap<&'static str, Desc>,
    total_scrapes: IntCounter,
    scrape_lock: Mutex<()>,
    metrics: Arc<ExporterMetrics>,
}

impl Exporter {
    pub fn new(
        source: Arc<dyn UserSource>,
        scrape_timeout: Duration,
        metrics: Arc<ExporterMetrics>,
    ) -> Result<Self> {
        let mut descriptors = BTreeMap::new();
        for (key, help, labels) in DESCRIPTORS {
            descriptors.insert(key, family::new_desc(fq_name(key), help, labels)?);
        }

        let total_scrapes = IntCounter::with_opts(
            Opts::new("scrapes_total", "Total number of scrapes performed").namespace(NAMESPACE),
        )
        .map_err(|e| ExporterError::MetricConstruction(e.to_string()))?;

        Ok(Self {
            source,
            scrape_timeout,
            descriptors,
            total_scrapes,
            scrape_lock: Mutex::new(()),
            metrics,
        })
    }

    /// Every registered descriptor plus the scrape counter's.
    pub fn describe(&self) -> Vec<&Desc> {
        let mut descs: Vec<&Desc> = self.descriptors.values().collect();
        descs.extend(self.total_scrapes.desc());
        descs
    }

    /// Run one scrape. Concurrent callers queue on the scrape lock.
    pub async fn collect(&self) -> Vec<MetricFamily> {
        let _guard = self.scrape_lock.lock().await;
        self.total_scrapes.inc();

        let started = Instant::now();
        let result = self.scrape(started + self.scrape_timeout).await;
        let elapsed = started.elapsed();
        self.metrics.observe_scrape(elapsed);

        let mut out = Families::default();
        match result {
            Ok(records) => {
                self.translate_into(&mut out, &records);
                self.push(&mut out, SCRAPE_DURATION, MetricType::GAUGE, elapsed.as_secs_f64(), &[]);
                tracing::debug!(
                    endpoint = %self.source.endpoint(),
                    users = records.len(),
                    elapsed_secs = elapsed.as_secs_f64(),
                    "scrape finished"
                );
            }
            Err(e) => {
                self.metrics.record_scrape_error(e.kind());
                tracing::warn!(
                    endpoint = %self.source.endpoint(),
                    kind = e.kind().as_str(),
                    error = %e,
                    "scrape failed"
                );
            }
        }

        // The scrape counter is a live metric, not a const one.
        for family in self.total_scrapes.collect() {
            out.push(family);
        }
        out.into_vec()
    }

    /// Translate records into families: exactly four gauges per record.
    pub fn translate(&self, records: &[UserStatusRecord]) -> Vec<MetricFamily> {
        let mut out = Families::default();
        self.translate_into(&mut out, records);
        out.into_vec()
    }

    fn translate_into(&self, out: &mut Families, records: &[UserStatusRecord]) {
        for rec in records {
            let target = [rec.user_hash.as_str()];
            let (upload_speed, download_speed) = rec.speed_or_zero();
            self.push(out, UPLOAD_TRAFFIC, MetricType::GAUGE, rec.upload_traffic as f64, &target);
            self.push(out, DOWNLOAD_TRAFFIC, MetricType::GAUGE, rec.download_traffic as f64, &target);
            self.push(out, CURRENT_UPLOAD_SPEED, MetricType::GAUGE, upload_speed as f64, &target);
            self.push(out, CURRENT_DOWNLOAD_SPEED, MetricType::GAUGE, download_speed as f64, &target);
        }
    }

    /// Build a one-metric family for `key`.
    ///
    /// Unknown keys get a descriptor synthesized on the fly (the key doubles
    /// as help text, no labels). Malformed metrics are dropped with a debug
    /// log and yield `None`.
    pub fn metric(&self, key: &str, value_type: MetricType, value: f64, labels: &[&str]) -> Option<MetricFamily> {
        let built = match self.descriptors.get(key) {
            Some(desc) => family::const_metric(desc, value_type, value, labels),
            None => family::new_desc(fq_name(key), key, &[])
                .and_then(|desc| family::const_metric(&desc, value_type, value, labels)),
        };
        match built {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::debug!(metric = key, error = %e, "dropping malformed metric");
                None
            }
        }
    }

    fn push(&self, out: &mut Families, key: &str, value_type: MetricType, value: f64, labels: &[&str]) {
        if let Some(family) = self.metric(key, value_type, value, labels) {
            out.push(family);
        }
    }

    /// One upstream round trip bounded by a single deadline.
    async fn scrape(&self, deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        match tokio::time::timeout_at(deadline, self.source.list_users(deadline)).await {
            Ok(res) => res,
            Err(_) => Err(ExporterError::ScrapeTimeout(self.scrape_timeout)),
        }
    }
}

//! In-memory user sources shared by the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prometheus::proto::{MetricFamily, MetricType};
use tokio::time::Instant;

use trojan_exporter::exporter::Exporter;
use trojan_exporter::obs::ExporterMetrics;
use trojan_exporter::upstream::UserSource;
use trojan_exporter_core::error::{ExporterError, Result};
use trojan_exporter_core::model::{SpeedSnapshot, UserStatusRecord};

pub fn record(hash: &str, upload: u64, download: u64, speed: Option<(u64, u64)>) -> UserStatusRecord {
    UserStatusRecord {
        user_hash: hash.into(),
        upload_traffic: upload,
        download_traffic: download,
        speed: speed.map(|(upload, download)| SpeedSnapshot { upload, download }),
    }
}

pub fn exporter(source: Arc<dyn UserSource>, timeout: Duration) -> (Exporter, Arc<ExporterMetrics>) {
    let metrics = Arc::new(ExporterMetrics::new().unwrap());
    let exporter = Exporter::new(source, timeout, Arc::clone(&metrics)).unwrap();
    (exporter, metrics)
}

/// One flattened metric: family name, type, `target` label, value.
#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    pub name: String,
    pub kind: MetricType,
    pub target: Option<String>,
    pub value: f64,
}

pub fn flatten(families: &[MetricFamily]) -> Vec<Flat> {
    let mut out = Vec::new();
    for family in families {
        let kind = family.get_field_type();
        for metric in family.get_metric() {
            let value = match kind {
                MetricType::COUNTER => metric.get_counter().value(),
                _ => metric.get_gauge().value(),
            };
            out.push(Flat {
                name: family.name().to_string(),
                kind,
                target: metric
                    .get_label()
                    .iter()
                    .find(|l| l.name() == "target")
                    .map(|l| l.value().to_string()),
                value,
            });
        }
    }
    out
}

/// Returns the same records on every call.
pub struct StaticSource(pub Vec<UserStatusRecord>);

#[async_trait]
impl UserSource for StaticSource {
    fn endpoint(&self) -> &str {
        "static"
    }

    async fn list_users(&self, _deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        Ok(self.0.clone())
    }
}

/// Fails every call like an unreachable upstream.
pub struct UnreachableSource;

#[async_trait]
impl UserSource for UnreachableSource {
    fn endpoint(&self) -> &str {
        "unreachable"
    }

    async fn list_users(&self, _deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        Err(ExporterError::dial(cause, Duration::from_secs(3)))
    }
}

/// Never answers in time.
pub struct StalledSource;

#[async_trait]
impl UserSource for StalledSource {
    fn endpoint(&self) -> &str {
        "stalled"
    }

    async fn list_users(&self, _deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

/// Records the interval of every call.
#[derive(Default)]
pub struct TimedSource {
    pub calls: Mutex<Vec<(Instant, Instant)>>,
}

#[async_trait]
impl UserSource for TimedSource {
    fn endpoint(&self) -> &str {
        "timed"
    }

    async fn list_users(&self, _deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.calls.lock().unwrap().push((started, Instant::now()));
        Ok(vec![record("abc", 1, 2, None)])
    }
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::error::Error;
use std::time::Duration;

use trojan_exporter_core::{ErrorKind, ExporterError};

#[test]
fn dial_error_carries_cause_and_timeout() {
    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = ExporterError::dial(cause, Duration::from_secs(3));

    assert_eq!(err.kind(), ErrorKind::Dial);
    assert_eq!(err.kind().as_str(), "dial");
    assert_eq!(err.to_string(), "failed to dial: refused, timeout: 3s");
    assert!(err.source().is_some());
}

#[test]
fn kinds_are_stable() {
    assert_eq!(
        ExporterError::StreamReceive("reset".into()).kind().as_str(),
        "stream_receive"
    );
    assert_eq!(
        ExporterError::ScrapeTimeout(Duration::from_secs(1)).kind(),
        ErrorKind::ScrapeTimeout
    );
    assert_eq!(
        ExporterError::MetricConstruction("arity".into()).kind().as_str(),
        "metric_construction"
    );
}

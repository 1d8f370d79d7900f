#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use prometheus::proto::MetricType;

use common::{exporter, record, StaticSource};
use trojan_exporter::exporter::family::{const_metric, encode, new_desc, Families};

fn empty_exporter() -> trojan_exporter::exporter::Exporter {
    exporter(Arc::new(StaticSource(Vec::new())), Duration::from_secs(3)).0
}

#[test]
fn encodes_families_in_first_seen_order() {
    let families = empty_exporter().translate(&[record("abc", 100, 200, None)]);

    let text = encode(&families).unwrap();
    let expected = "\
# HELP trojan_go_upload_traffic_bytes_total Number of transmitted bytes
# TYPE trojan_go_upload_traffic_bytes_total gauge
trojan_go_upload_traffic_bytes_total{target=\"abc\"} 100
# HELP trojan_go_download_traffic_bytes_total Number of received bytes
# TYPE trojan_go_download_traffic_bytes_total gauge
trojan_go_download_traffic_bytes_total{target=\"abc\"} 200
# HELP trojan_go_current_upload_speed Number of current upload speed bytes
# TYPE trojan_go_current_upload_speed gauge
trojan_go_current_upload_speed{target=\"abc\"} 0
# HELP trojan_go_current_download_speed Number of current download speed bytes
# TYPE trojan_go_current_download_speed gauge
trojan_go_current_download_speed{target=\"abc\"} 0
";
    assert_eq!(text, expected);
}

#[test]
fn duplicate_identifiers_stay_separate_lines_under_one_header() {
    let families =
        empty_exporter().translate(&[record("dup", 1, 2, None), record("dup", 3, 4, None)]);

    let text = encode(&families).unwrap();

    assert_eq!(
        text.matches("# TYPE trojan_go_upload_traffic_bytes_total gauge")
            .count(),
        1
    );
    assert!(text.contains(
        "trojan_go_upload_traffic_bytes_total{target=\"dup\"} 1\n\
         trojan_go_upload_traffic_bytes_total{target=\"dup\"} 3\n"
    ));
}

#[test]
fn interleaved_pushes_merge_by_name() {
    let desc_a = new_desc("m_a".into(), "a", &["target"]).unwrap();
    let desc_b = new_desc("m_b".into(), "b", &["target"]).unwrap();

    let mut families = Families::default();
    families.push(const_metric(&desc_a, MetricType::GAUGE, 1.0, &["x"]).unwrap());
    families.push(const_metric(&desc_b, MetricType::GAUGE, 2.0, &["x"]).unwrap());
    families.push(const_metric(&desc_a, MetricType::GAUGE, 3.0, &["y"]).unwrap());
    let families = families.into_vec();

    assert_eq!(families.len(), 2);
    assert_eq!(families[0].name(), "m_a");
    assert_eq!(families[0].get_metric().len(), 2);

    let text = encode(&families).unwrap();
    assert!(text.contains("m_a{target=\"x\"} 1\nm_a{target=\"y\"} 3\n"));
}

#[test]
fn label_values_are_escaped() {
    let desc = new_desc("m".into(), "h", &["target"]).unwrap();
    let family = const_metric(&desc, MetricType::GAUGE, 0.25, &["a\"b\\c\nd"]).unwrap();

    let text = encode(&[family]).unwrap();

    assert!(text.contains(r#"m{target="a\"b\\c\nd"} 0.25"#), "{text}");
}

#[test]
fn unlabeled_counter_has_no_braces() {
    let desc = new_desc("trojan_go_scrapes_total".into(), "Total number of scrapes performed", &[])
        .unwrap();
    let family = const_metric(&desc, MetricType::COUNTER, 3.0, &[]).unwrap();

    let text = encode(&[family]).unwrap();

    assert!(text.contains("# TYPE trojan_go_scrapes_total counter\n"));
    assert!(text.ends_with("trojan_go_scrapes_total 3\n"));
}

#[test]
fn arity_mismatch_is_rejected() {
    let desc = new_desc("m".into(), "h", &["target"]).unwrap();

    assert!(const_metric(&desc, MetricType::GAUGE, 1.0, &[]).is_err());
    assert!(const_metric(&desc, MetricType::GAUGE, 1.0, &["a", "b"]).is_err());
}

#[test]
fn empty_scrape_encodes_nothing() {
    assert_eq!(encode(&[]).unwrap(), "");
}

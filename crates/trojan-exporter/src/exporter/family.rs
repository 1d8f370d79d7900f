//! Const metric families built from descriptors at scrape time.
//!
//! Every sample becomes a single-metric `MetricFamily`; `Families` merges
//! them by name in first-seen order. Label values are not deduplicated: two
//! records sharing an identifier stay two metrics of the same family.

use std::collections::HashMap;

use prometheus::core::Desc;
use prometheus::proto::{Counter, Gauge, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::TextEncoder;

use trojan_exporter_core::error::{ExporterError, Result};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Build a descriptor, validating the metric and label names.
pub fn new_desc(fq_name: String, help: &str, labels: &[&str]) -> Result<Desc> {
    Desc::new(
        fq_name,
        help.to_string(),
        labels.iter().map(|l| (*l).to_string()).collect(),
        HashMap::new(),
    )
    .map_err(|e| ExporterError::MetricConstruction(e.to_string()))
}

/// Build a one-metric family for `desc`, checking label arity.
pub fn const_metric(
    desc: &Desc,
    value_type: MetricType,
    value: f64,
    label_values: &[&str],
) -> Result<MetricFamily> {
    if desc.variable_labels.len() != label_values.len() {
        return Err(ExporterError::MetricConstruction(format!(
            "{}: expected {} label values, got {}",
            desc.fq_name,
            desc.variable_labels.len(),
            label_values.len()
        )));
    }

    let labels = desc
        .variable_labels
        .iter()
        .zip(label_values)
        .map(|(name, value)| {
            let mut pair = LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value((*value).to_string());
            pair
        })
        .collect();
    let mut metric = Metric::from_label(labels);

    match value_type {
        MetricType::GAUGE => {
            let mut gauge = Gauge::default();
            gauge.set_value(value);
            metric.set_gauge(gauge);
        }
        MetricType::COUNTER => {
            let mut counter = Counter::default();
            counter.set_value(value);
            metric.set_counter(counter);
        }
        other => {
            return Err(ExporterError::MetricConstruction(format!(
                "{}: unsupported const metric type {other:?}",
                desc.fq_name
            )))
        }
    }

    let mut family = MetricFamily::default();
    family.set_name(desc.fq_name.clone());
    family.set_help(desc.help.clone());
    family.set_field_type(value_type);
    family.set_metric(vec![metric]);
    Ok(family)
}

/// Families accumulated during one scrape.
#[derive(Default)]
pub struct Families(Vec<MetricFamily>);

impl Families {
    /// Append the metrics of `family` to the family of the same name.
    pub fn push(&mut self, mut family: MetricFamily) {
        match self.0.iter_mut().find(|f| f.name() == family.name()) {
            Some(existing) => existing.mut_metric().append(family.mut_metric()),
            None => self.0.push(family),
        }
    }

    pub fn into_vec(self) -> Vec<MetricFamily> {
        self.0
    }
}

/// Render families in Prometheus text exposition format.
pub fn encode(families: &[MetricFamily]) -> Result<String> {
    TextEncoder::new()
        .encode_to_string(families)
        .map_err(|e| ExporterError::Internal(format!("encode metrics: {e}")))
}

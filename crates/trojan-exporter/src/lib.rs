//! trojan-exporter library entry.
//!
//! This crate wires the upstream gRPC source, the scrape collector, config,
//! self metrics, and the HTTP surface into a Prometheus exporter for
//! Trojan-Go. It is consumed by the binary (`main.rs`) and by integration
//! tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod exporter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;

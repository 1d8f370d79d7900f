//! Top-level facade crate for trojan-exporter.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use trojan_exporter_core::*;
}

pub mod exporter {
    pub use trojan_exporter::*;
}

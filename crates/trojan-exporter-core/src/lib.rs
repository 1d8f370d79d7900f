//! trojan-exporter core: runtime-free wire messages, domain records, and errors.
//!
//! This crate defines the upstream wire contract (the `trojan.api` messages
//! served by Trojan-Go's administrative API) and the error surface shared by
//! the exporter. It carries no transport or runtime dependencies so the
//! translation rules can be tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Partial upstream records degrade to defaults instead of crashing a scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod proto;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
pub use model::{SpeedSnapshot, UserStatusRecord};

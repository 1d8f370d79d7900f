//! Upstream user sources.
//!
//! The collector only sees `UserSource`; the production implementation talks
//! gRPC to Trojan-Go, tests plug in in-memory sources.

pub mod grpc;

use async_trait::async_trait;
use tokio::time::Instant;

use trojan_exporter_core::error::Result;
use trojan_exporter_core::model::UserStatusRecord;

pub use grpc::GrpcUserSource;

/// One round trip to the upstream per call.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Upstream address, for logs.
    fn endpoint(&self) -> &str;

    /// Enumerate all users. Must not outlive `deadline`.
    async fn list_users(&self, deadline: Instant) -> Result<Vec<UserStatusRecord>>;
}

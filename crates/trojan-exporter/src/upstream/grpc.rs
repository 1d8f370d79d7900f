//! gRPC client for Trojan-Go's `TrojanServerService`.
//!
//! Every call dials a fresh plaintext HTTP/2 channel and drops it on return,
//! so no connection state is shared between scrapes.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use trojan_exporter_core::error::{ExporterError, Result};
use trojan_exporter_core::model::UserStatusRecord;
use trojan_exporter_core::proto::{ListUsersRequest, ListUsersResponse, LIST_USERS_PATH};

use super::UserSource;

#[derive(Debug, Clone)]
pub struct GrpcUserSource {
    endpoint: String,
    timeout: Duration,
}

impl GrpcUserSource {
    /// `endpoint` is `host:port` or a full `http://` URI.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    fn uri(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            format!("http://{}", self.endpoint)
        }
    }

    async fn dial(&self, deadline: Instant) -> Result<Channel> {
        let endpoint = Endpoint::from_shared(self.uri())
            .map_err(|e| ExporterError::dial(e, self.timeout))?
            .connect_timeout(self.timeout);

        match tokio::time::timeout_at(deadline, endpoint.connect()).await {
            Ok(Ok(channel)) => Ok(channel),
            Ok(Err(e)) => Err(ExporterError::dial(e, self.timeout)),
            Err(elapsed) => Err(ExporterError::dial(elapsed, self.timeout)),
        }
    }
}

#[async_trait]
impl UserSource for GrpcUserSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn list_users(&self, deadline: Instant) -> Result<Vec<UserStatusRecord>> {
        let channel = self.dial(deadline).await?;
        let mut client = Grpc::new(channel);
        client
            .ready()
            .await
            .map_err(|e| ExporterError::dial(e, self.timeout))?;

        let mut request = tonic::Request::new(ListUsersRequest {});
        request.set_timeout(deadline.saturating_duration_since(Instant::now()));

        let codec: ProstCodec<ListUsersRequest, ListUsersResponse> = ProstCodec::default();
        let mut stream = client
            .server_streaming(request, PathAndQuery::from_static(LIST_USERS_PATH), codec)
            .await
            .map_err(|status| ExporterError::Rpc(status.to_string()))?
            .into_inner();

        let mut records = Vec::new();
        loop {
            match stream.message().await {
                Ok(Some(resp)) => match UserStatusRecord::from_response(resp) {
                    Some(rec) => records.push(rec),
                    None => tracing::debug!(endpoint = %self.endpoint, "skipping response without status"),
                },
                Ok(None) => break,
                Err(status) => return Err(ExporterError::StreamReceive(status.to_string())),
            }
        }

        tracing::debug!(endpoint = %self.endpoint, users = records.len(), "list users drained");
        Ok(records)
    }
}

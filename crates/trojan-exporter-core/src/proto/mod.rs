//! Wire messages of Trojan-Go's administrative API (`package trojan.api`).
//!
//! Only the subset consumed by the exporter is modeled. Field tags follow the
//! upstream `api.proto`; unknown fields are skipped by the decoder, so newer
//! servers stay compatible.

/// Full method path of the user enumeration call.
pub const LIST_USERS_PATH: &str = "/trojan.api.TrojanServerService/ListUsers";

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub password: String,
    #[prost(string, tag = "2")]
    pub hash: String,
}

/// Cumulative traffic in bytes.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Traffic {
    #[prost(uint64, tag = "1")]
    pub upload_traffic: u64,
    #[prost(uint64, tag = "2")]
    pub download_traffic: u64,
}

/// Throughput in bytes per second.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Speed {
    #[prost(uint64, tag = "1")]
    pub upload_speed: u64,
    #[prost(uint64, tag = "2")]
    pub download_speed: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserStatus {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(message, optional, tag = "2")]
    pub traffic_total: Option<Traffic>,
    /// Absent when the user has no live session.
    #[prost(message, optional, tag = "3")]
    pub speed_current: Option<Speed>,
    #[prost(message, optional, tag = "4")]
    pub speed_limit: Option<Speed>,
    #[prost(int32, tag = "5")]
    pub ip_current: i32,
    #[prost(int32, tag = "6")]
    pub ip_limit: i32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ListUsersRequest {}

/// One element of the `ListUsers` response stream.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ListUsersResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<UserStatus>,
}

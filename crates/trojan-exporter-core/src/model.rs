//! Domain records translated from the wire messages.

use crate::proto::{ListUsersResponse, UserStatus};

/// Live throughput of a connected user, bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedSnapshot {
    pub upload: u64,
    pub download: u64,
}

/// Snapshot of one user's traffic, valid for a single scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatusRecord {
    /// Stable user identifier (password hash).
    pub user_hash: String,
    pub upload_traffic: u64,
    pub download_traffic: u64,
    /// `None` when the user has no live session.
    pub speed: Option<SpeedSnapshot>,
}

impl UserStatusRecord {
    /// Extract the record carried by one stream element.
    ///
    /// Returns `None` when the element has no status at all; missing nested
    /// sub-records fall back to proto3 defaults.
    pub fn from_response(resp: ListUsersResponse) -> Option<Self> {
        resp.status.map(Self::from)
    }

    /// Current (upload, download) speed, zero without a live session.
    pub fn speed_or_zero(&self) -> (u64, u64) {
        self.speed
            .map(|s| (s.upload, s.download))
            .unwrap_or((0, 0))
    }
}

impl From<UserStatus> for UserStatusRecord {
    fn from(status: UserStatus) -> Self {
        let traffic = status.traffic_total.unwrap_or_default();
        Self {
            user_hash: status.user.map(|u| u.hash).unwrap_or_default(),
            upload_traffic: traffic.upload_traffic,
            download_traffic: traffic.download_traffic,
            speed: status.speed_current.map(|s| SpeedSnapshot {
                upload: s.upload_speed,
                download: s.download_speed,
            }),
        }
    }
}

//! Device request log model.
//!
//! A request log entry is created when data is requested from a device;
//! it is handled once the device answers. Request logs feed the
//! per-device response-time metric.

use serde::{Deserialize, Serialize};

use super::DeviceId;

/// Kind of data requested from a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Campus token refresh.
    CampusTokenRequest,
    /// Lecture attendance update.
    LectureUpdateRequest,
}

/// A request sent to a device.
///
/// Times are in milliseconds relative to an arbitrary epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLog {
    /// Device the request was sent to.
    pub device_id: DeviceId,
    /// What was requested.
    pub request_type: RequestType,
    /// When the request was created (ms).
    pub created_at_ms: i64,
    /// When the device answered (ms). `None` = never handled.
    #[serde(default)]
    pub handled_at_ms: Option<i64>,
}

impl RequestLog {
    /// Creates an unhandled request log entry.
    pub fn new(device_id: impl Into<DeviceId>, request_type: RequestType, created_at_ms: i64) -> Self {
        Self {
            device_id: device_id.into(),
            request_type,
            created_at_ms,
            handled_at_ms: None,
        }
    }

    /// Marks the request as handled at the given time.
    pub fn handled_at(mut self, handled_at_ms: i64) -> Self {
        self.handled_at_ms = Some(handled_at_ms);
        self
    }

    /// Whether the device answered.
    pub fn is_handled(&self) -> bool {
        self.handled_at_ms.is_some()
    }

    /// Response latency (ms).
    ///
    /// `None` if the request is unhandled or the difference does not fit
    /// in an `i64`.
    pub fn latency_ms(&self) -> Option<i64> {
        self.handled_at_ms?.checked_sub(self.created_at_ms)
    }
}

//! Attendance relation edges.

use serde::{Deserialize, Serialize};

use super::{DeviceId, LectureId};

/// One edge of the many-to-many device/lecture attendance relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attendance {
    /// Attending device.
    pub device_id: DeviceId,
    /// Attended lecture.
    pub lecture_id: LectureId,
}

impl Attendance {
    /// Creates an attendance edge.
    pub fn new(device_id: impl Into<DeviceId>, lecture_id: impl Into<LectureId>) -> Self {
        Self {
            device_id: device_id.into(),
            lecture_id: lecture_id.into(),
        }
    }
}

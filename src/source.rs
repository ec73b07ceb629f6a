//! Input data sources.
//!
//! The selection engine never talks to storage directly. A caller hands
//! it an [`AttendanceSource`]: a narrow, read-only view that yields the
//! lecture catalog, the device catalog, the attendance relation, and
//! optionally a precomputed maximum single-device attendance.
//!
//! [`Snapshot`] is the in-memory implementation; it can be assembled with
//! builders or deserialized from JSON.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::CoverageResult;
use crate::metrics::apply_response_times;
use crate::models::{Attendance, Device, Lecture, RequestLog};
use crate::validation::validate_request_logs;

/// Read-only supplier of coverage input.
pub trait AttendanceSource {
    /// Lecture catalog.
    fn lectures(&self) -> CoverageResult<Vec<Lecture>>;

    /// Device catalog with response-time metric.
    fn devices(&self) -> CoverageResult<Vec<Device>>;

    /// Attendance relation.
    fn attendance(&self) -> CoverageResult<Vec<Attendance>>;

    /// Precomputed maximum number of lectures attended by one device.
    ///
    /// `None` lets the engine compute it.
    fn max_attendance(&self) -> CoverageResult<Option<usize>> {
        Ok(None)
    }
}

/// In-memory coverage input.
///
/// # Example
///
/// ```
/// use u_coverage::source::{AttendanceSource, Snapshot};
///
/// let snapshot = Snapshot::from_json(r#"{
///     "lectures": [{"id": "L1"}],
///     "devices": [{"id": "D1", "avg_response_time": 1.5}],
///     "attendance": [{"device_id": "D1", "lecture_id": "L1"}]
/// }"#).unwrap();
///
/// assert_eq!(snapshot.lectures().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Lecture catalog.
    pub lectures: Vec<Lecture>,
    /// Device catalog.
    pub devices: Vec<Device>,
    /// Attendance relation.
    pub attendance: Vec<Attendance>,
    /// Request history used to derive missing response times.
    pub request_logs: Vec<RequestLog>,
    /// Precomputed maximum single-device attendance.
    pub max_attendance: Option<usize>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> CoverageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a snapshot from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> CoverageResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Adds a lecture.
    pub fn with_lecture(mut self, lecture: Lecture) -> Self {
        self.lectures.push(lecture);
        self
    }

    /// Adds a device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// Adds an attendance edge.
    pub fn with_attendance(mut self, attendance: Attendance) -> Self {
        self.attendance.push(attendance);
        self
    }

    /// Adds a request log entry.
    pub fn with_request_log(mut self, log: RequestLog) -> Self {
        self.request_logs.push(log);
        self
    }

    /// Sets the precomputed maximum single-device attendance.
    pub fn with_max_attendance(mut self, max: usize) -> Self {
        self.max_attendance = Some(max);
        self
    }
}

impl AttendanceSource for Snapshot {
    fn lectures(&self) -> CoverageResult<Vec<Lecture>> {
        Ok(self.lectures.clone())
    }

    /// Devices, with missing response times derived from request logs.
    ///
    /// Malformed request logs are rejected as invalid input.
    fn devices(&self) -> CoverageResult<Vec<Device>> {
        validate_request_logs(&self.request_logs)?;
        let mut devices = self.devices.clone();
        apply_response_times(&mut devices, &self.request_logs);
        Ok(devices)
    }

    fn attendance(&self) -> CoverageResult<Vec<Attendance>> {
        Ok(self.attendance.clone())
    }

    fn max_attendance(&self) -> CoverageResult<Option<usize>> {
        Ok(self.max_attendance)
    }
}

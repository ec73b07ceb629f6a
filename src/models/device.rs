//! Device model.
//!
//! A device is a student-held sensor that can report attendance for the
//! lectures its owner attends. Devices are immutable once loaded.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Opaque, unique device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates a device identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (malformed input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A device with its quality metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique device identifier.
    pub id: DeviceId,
    /// Mean latency (seconds) between a request and the device's answer.
    /// `None` (or NaN) when the device never handled a request.
    #[serde(default)]
    pub avg_response_time: Option<f64>,
}

impl Device {
    /// Creates a device with no response-time history.
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            avg_response_time: None,
        }
    }

    /// Sets the average response time (seconds).
    pub fn with_avg_response_time(mut self, seconds: f64) -> Self {
        self.avg_response_time = Some(seconds);
        self
    }

    /// Response time usable for ranking; unknown or NaN maps to `+inf`.
    pub fn ranking_latency(&self) -> f64 {
        ranking_latency(self.avg_response_time)
    }
}

/// Maps an optional latency onto a totally ordered key where unknown
/// values sort last.
pub(crate) fn ranking_latency(latency: Option<f64>) -> f64 {
    match latency {
        Some(v) if !v.is_nan() => v,
        _ => f64::INFINITY,
    }
}

/// Orders two latencies, faster first, unknown last.
pub(crate) fn compare_latency(a: Option<f64>, b: Option<f64>) -> Ordering {
    ranking_latency(a).total_cmp(&ranking_latency(b))
}

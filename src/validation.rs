//! Input validation for coverage problems.
//!
//! Checks structural integrity of the lecture catalog, the device
//! catalog, and the attendance relation before any index is built.
//! Detects:
//! - Empty lecture or device identifiers
//! - Attendance pairs with an empty side
//! - Negative or infinite response times
//! - Request logs answered before they were issued, or with a latency
//!   outside the `i64` range
//!
//! Unknown references (a pair naming a lecture absent from the catalog)
//! are not errors; the selection engine ignores them for gain.

use std::fmt;

use crate::models::{Attendance, Device, Lecture, RequestLog};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A catalog lecture has an empty ID.
    EmptyLectureId,
    /// A catalog device has an empty ID.
    EmptyDeviceId,
    /// An attendance pair has an empty device or lecture ID.
    MalformedAttendance,
    /// A response time is negative or infinite.
    InvalidResponseTime,
    /// A request log has a negative or unrepresentable latency.
    InvalidRequestLog,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the attendance relation alone.
///
/// This is the only check the attendance index needs; the catalogs are
/// validated by [`validate_input`].
pub fn validate_attendance(attendance: &[Attendance]) -> ValidationResult {
    let mut errors = Vec::new();
    check_attendance(attendance, &mut errors);
    into_result(errors)
}

/// Validates the input data for a coverage problem.
///
/// Checks:
/// 1. Every lecture has a non-empty ID
/// 2. Every device has a non-empty ID
/// 3. Every response time is either unknown (`None`/NaN) or finite and non-negative
/// 4. Every attendance pair names a non-empty device and lecture
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    lectures: &[Lecture],
    devices: &[Device],
    attendance: &[Attendance],
) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, lecture) in lectures.iter().enumerate() {
        if lecture.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLectureId,
                format!("lecture #{i} has an empty id"),
            ));
        }
    }

    for (i, device) in devices.iter().enumerate() {
        if device.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDeviceId,
                format!("device #{i} has an empty id"),
            ));
        }
        if let Some(t) = device.avg_response_time {
            // NaN means "no handled requests" and is allowed
            if t.is_infinite() || t < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResponseTime,
                    format!("device '{}' has invalid response time {t}", device.id),
                ));
            }
        }
    }

    check_attendance(attendance, &mut errors);

    into_result(errors)
}

/// Validates request logs before they feed the response-time metric.
///
/// Unhandled requests are always valid.
pub fn validate_request_logs(logs: &[RequestLog]) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, log) in logs.iter().enumerate() {
        if log.device_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRequestLog,
                format!("request log #{i} has an empty device id"),
            ));
        }
        if !log.is_handled() {
            continue;
        }
        match log.latency_ms() {
            Some(latency) if latency < 0 => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRequestLog,
                format!(
                    "request log #{i} for device '{}' was handled {}ms before it was created",
                    log.device_id, -i128::from(latency)
                ),
            )),
            Some(_) => {}
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRequestLog,
                format!(
                    "request log #{i} for device '{}' has out-of-range timestamps",
                    log.device_id
                ),
            )),
        }
    }

    into_result(errors)
}

fn check_attendance(attendance: &[Attendance], errors: &mut Vec<ValidationError>) {
    for (i, pair) in attendance.iter().enumerate() {
        if pair.device_id.is_empty() || pair.lecture_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedAttendance,
                format!(
                    "attendance #{i} has an empty id (device '{}', lecture '{}')",
                    pair.device_id, pair.lecture_id
                ),
            ));
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

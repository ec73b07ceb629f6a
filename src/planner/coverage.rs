//! End-to-end coverage planning.
//!
//! # Pipeline
//!
//! 1. Validate the input and build the attendance index.
//! 2. Run the greedy selector over an owned copy of the index.
//! 3. Verify the selection against the untouched relation.
//!
//! Each phase is timed and logged.

use std::time::Instant;

use tracing::info;

use super::report::{CoverageReport, PhaseTimings};
use crate::error::CoverageResult;
use crate::models::{Attendance, Device, DeviceId, Lecture};
use crate::selection::{
    AttendanceIndex, CoverageTracker, CoverageVerifier, GreedySelector, SelectionConfig,
};
use crate::source::AttendanceSource;
use crate::validation::validate_input;

/// Input container for coverage planning.
#[derive(Debug, Clone, Default)]
pub struct CoverageRequest {
    /// Lecture catalog.
    pub lectures: Vec<Lecture>,
    /// Device catalog with response-time metric.
    pub devices: Vec<Device>,
    /// Attendance relation.
    pub attendance: Vec<Attendance>,
    /// Precomputed maximum single-device attendance.
    pub max_attendance: Option<usize>,
}

impl CoverageRequest {
    /// Creates a new coverage request.
    pub fn new(lectures: Vec<Lecture>, devices: Vec<Device>, attendance: Vec<Attendance>) -> Self {
        Self {
            lectures,
            devices,
            attendance,
            max_attendance: None,
        }
    }

    /// Sets the precomputed maximum single-device attendance.
    pub fn with_max_attendance(mut self, max: usize) -> Self {
        self.max_attendance = Some(max);
        self
    }

    /// Loads a request from a data source.
    pub fn from_source<S: AttendanceSource + ?Sized>(source: &S) -> CoverageResult<Self> {
        Ok(Self {
            lectures: source.lectures()?,
            devices: source.devices()?,
            attendance: source.attendance()?,
            max_attendance: source.max_attendance()?,
        })
    }
}

/// Runs selection and verification as one batch.
///
/// # Example
///
/// ```
/// use u_coverage::models::{Attendance, Device, Lecture};
/// use u_coverage::planner::{CoveragePlanner, CoverageRequest};
///
/// let request = CoverageRequest::new(
///     vec![Lecture::new("L1"), Lecture::new("L2"), Lecture::new("L4")],
///     vec![Device::new("D1"), Device::new("D2")],
///     vec![Attendance::new("D1", "L1"), Attendance::new("D2", "L2")],
/// );
///
/// let report = CoveragePlanner::new().plan(&request).unwrap();
/// assert_eq!(report.selected_count(), 2);
/// assert!(report.is_fully_covered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoveragePlanner {
    config: SelectionConfig,
}

impl CoveragePlanner {
    /// Creates a planner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection configuration.
    pub fn with_config(mut self, config: SelectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Plans coverage for a request.
    ///
    /// A request-level `max_attendance` takes precedence over the
    /// configured bound hint.
    ///
    /// # Errors
    /// [`CoverageError::InvalidInput`](crate::CoverageError::InvalidInput)
    /// if the input is malformed. Partial coverage is not an error.
    pub fn plan(&self, request: &CoverageRequest) -> CoverageResult<CoverageReport> {
        let started = Instant::now();

        validate_input(&request.lectures, &request.devices, &request.attendance)?;
        let index = AttendanceIndex::build(&request.attendance)?;
        let tracker = CoverageTracker::new(&request.lectures);
        let index_time = started.elapsed();

        info!(
            lectures = request.lectures.len(),
            devices = request.devices.len(),
            attendance = request.attendance.len(),
            indexed_devices = index.len(),
            elapsed = ?index_time,
            "built attendance index"
        );

        let mut config = self.config.clone();
        if let Some(max) = request.max_attendance {
            config.bound_hint = Some(max);
        }

        let selection_started = Instant::now();
        let selection = GreedySelector::with_config(config).select(index, tracker, &request.devices);
        let selection_time = selection_started.elapsed();

        info!(
            selected = selection.len(),
            covered = selection.covered_count,
            total = selection.total_count,
            elapsed = ?selection_time,
            "found device set"
        );

        let verification_started = Instant::now();
        let selected: Vec<DeviceId> = selection.device_ids().into_iter().cloned().collect();
        let verification = CoverageVerifier::new(&request.attendance)
            .with_catalog(&request.lectures)
            .verify(&selected);
        let verification_time = verification_started.elapsed();

        info!(
            complete = verification.is_complete(),
            coverable = verification.coverable_count,
            unreachable = verification.unreachable.len(),
            uncatalogued = verification.uncatalogued.len(),
            elapsed = ?verification_time,
            "verified coverage"
        );

        Ok(CoverageReport {
            lecture_count: request.lectures.len(),
            device_count: request.devices.len(),
            attendance_count: request.attendance.len(),
            selection,
            verification,
            timings: PhaseTimings {
                index: index_time,
                selection: selection_time,
                verification: verification_time,
                total: started.elapsed(),
            },
        })
    }

    /// Loads input from a source and plans coverage.
    pub fn plan_from_source<S: AttendanceSource + ?Sized>(
        &self,
        source: &S,
    ) -> CoverageResult<CoverageReport> {
        let request = CoverageRequest::from_source(source)?;
        self.plan(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoverageError;
    use crate::selection::TieBreak;
    use crate::source::Snapshot;

    fn scenario() -> CoverageRequest {
        CoverageRequest::new(
            vec![
                Lecture::new("L1"),
                Lecture::new("L2"),
                Lecture::new("L3"),
                Lecture::new("L4"),
            ],
            vec![
                Device::new("D1").with_avg_response_time(5.0),
                Device::new("D2").with_avg_response_time(1.0),
                Device::new("D3"),
            ],
            vec![
                Attendance::new("D1", "L1"),
                Attendance::new("D1", "L2"),
                Attendance::new("D2", "L2"),
                Attendance::new("D2", "L3"),
                Attendance::new("D3", "L1"),
            ],
        )
    }

    #[test]
    fn test_plan_scenario() {
        let report = CoveragePlanner::new().plan(&scenario()).unwrap();

        // D1 and D2 tie at two lectures; D2 answers faster
        let ids: Vec<&str> = report.selected().into_iter().map(|d| d.as_str()).collect();
        assert_eq!(ids, vec!["D2", "D1"]);
        assert!(report.is_fully_covered());
        assert_eq!(report.verification.unreachable.len(), 1);
        assert!(!report.selection.covers_all_tracked());
        assert_eq!(report.lecture_count, 4);
        assert_eq!(report.attendance_count, 5);
    }

    #[test]
    fn test_plan_bound_pruned() {
        let planner = CoveragePlanner::new()
            .with_config(SelectionConfig::default().with_tie_break(TieBreak::BoundPruned));
        let report = planner.plan(&scenario()).unwrap();

        let ids: Vec<&str> = report.selected().into_iter().map(|d| d.as_str()).collect();
        assert_eq!(ids, vec!["D1", "D2"]);
        assert!(report.is_fully_covered());
    }

    #[test]
    fn test_request_max_attendance_overrides_config() {
        let request = scenario().with_max_attendance(7);
        let planner = CoveragePlanner::new().with_config(SelectionConfig::default().with_bound_hint(3));
        let report = planner.plan(&request).unwrap();
        assert_eq!(report.selection.initial_bound, 7);
    }

    #[test]
    fn test_plan_from_snapshot() {
        let snapshot = Snapshot::new()
            .with_lecture(Lecture::new("L1"))
            .with_device(Device::new("D1"))
            .with_attendance(Attendance::new("D1", "L1"))
            .with_max_attendance(1);

        let report = CoveragePlanner::new().plan_from_source(&snapshot).unwrap();
        assert_eq!(report.selected_count(), 1);
        assert!(report.is_fully_covered());
    }

    #[test]
    fn test_invalid_input() {
        let request = CoverageRequest::new(vec![Lecture::new("")], vec![], vec![]);
        let err = CoveragePlanner::new().plan(&request).unwrap_err();
        assert!(matches!(err, CoverageError::InvalidInput(_)));
    }

    struct FailingSource;

    impl AttendanceSource for FailingSource {
        fn lectures(&self) -> CoverageResult<Vec<Lecture>> {
            Err(CoverageError::Source {
                message: "connection refused".into(),
            })
        }

        fn devices(&self) -> CoverageResult<Vec<Device>> {
            Ok(Vec::new())
        }

        fn attendance(&self) -> CoverageResult<Vec<Attendance>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_source_failure_propagates() {
        let err = CoveragePlanner::new()
            .plan_from_source(&FailingSource)
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_empty_catalog_plans_nothing() {
        let request = CoverageRequest::new(
            Vec::new(),
            vec![Device::new("D1")],
            vec![Attendance::new("D1", "L1")],
        );
        let report = CoveragePlanner::new().plan(&request).unwrap();
        assert_eq!(report.selected_count(), 0);
        assert!(report.is_fully_covered());
        assert_eq!(report.verification.uncatalogued, vec![crate::models::LectureId::new("L1")]);
    }

    #[test]
    fn test_empty_request() {
        let report = CoveragePlanner::new().plan(&CoverageRequest::default()).unwrap();
        assert_eq!(report.selected_count(), 0);
        assert!(report.is_fully_covered());
    }
}

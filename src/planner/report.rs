//! Coverage run report.
//!
//! Summarizes a planning run: input sizes, the ordered selection with its
//! per-round trace, the independent verification verdict, and phase
//! timings.

use std::time::Duration;

use serde::Serialize;

use crate::models::DeviceId;
use crate::selection::{Selection, Verification};

/// Wall-clock duration of each planning phase.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PhaseTimings {
    /// Validation and index construction.
    pub index: Duration,
    /// Greedy selection loop.
    pub selection: Duration,
    /// Independent verification.
    pub verification: Duration,
    /// Whole run.
    pub total: Duration,
}

/// Outcome of a planning run.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Lectures in the catalog.
    pub lecture_count: usize,
    /// Devices in the catalog.
    pub device_count: usize,
    /// Attendance pairs supplied (before deduplication).
    pub attendance_count: usize,
    /// Greedy selection.
    pub selection: Selection,
    /// Verification against the full relation.
    pub verification: Verification,
    /// Phase timings.
    pub timings: PhaseTimings,
}

impl CoverageReport {
    /// Selected devices in selection order.
    pub fn selected(&self) -> Vec<&DeviceId> {
        self.selection.device_ids()
    }

    /// Number of selected devices.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Whether every lecture with at least one attendee is covered.
    pub fn is_fully_covered(&self) -> bool {
        self.verification.is_complete()
    }

    /// Fraction of coverable lectures covered (0.0..1.0).
    ///
    /// An empty coverable universe counts as fully covered.
    pub fn coverage_ratio(&self) -> f64 {
        if self.verification.coverable_count == 0 {
            1.0
        } else {
            self.verification.covered_count as f64 / self.verification.coverable_count as f64
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Coverage planning and reporting.
//!
//! Wires a data source to the selection engine and summarizes the run.
//!
//! # Pipeline
//!
//! `CoveragePlanner` validates input, indexes attendance, runs the greedy
//! selector, and cross-checks the result with the verifier.
//!
//! # Report
//!
//! `CoverageReport` carries the ordered selection, the per-round trace,
//! the verification verdict, and phase timings.

mod coverage;
mod report;

pub use coverage::{CoveragePlanner, CoverageRequest};
pub use report::{CoverageReport, PhaseTimings};

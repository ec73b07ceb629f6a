//! Device coverage selection for the U-Engine ecosystem.
//!
//! Selects a small set of devices such that every lecture with at least
//! one attendee is attended by a selected device. This is greedy
//! maximum coverage with a monotone pruning bound and an explicit
//! tie-break policy, followed by an independent verification pass.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Lecture`, `Device`, `Attendance`, `RequestLog`
//! - **`validation`**: Input integrity checks (empty identifiers, bad metrics)
//! - **`selection`**: `AttendanceIndex`, `CoverageTracker`, `BoundTracker`,
//!   `GreedySelector`, `CoverageVerifier`
//! - **`metrics`**: Per-device response-time metric from request logs
//! - **`source`**: The read-only `AttendanceSource` seam and JSON `Snapshot`
//! - **`planner`**: End-to-end pipeline and `CoverageReport`
//!
//! # Execution Model
//!
//! A run is a single synchronous batch over data resident in memory. The
//! selector owns its index and tracker exclusively and mutates them in
//! place; there is no mid-run checkpoint.
//!
//! # References
//!
//! - Johnson (1974), "Approximation Algorithms for Combinatorial Problems"
//! - Feige (1998), "A Threshold of ln n for Approximating Set Cover"

pub mod error;
pub mod metrics;
pub mod models;
pub mod planner;
pub mod selection;
pub mod source;
pub mod validation;

pub use error::{CoverageError, CoverageResult};

//! Greedy coverage selection and verification.
//!
//! Provides the attendance index, coverage and bound tracking, the greedy
//! maximum-coverage selector, and an independent coverage verifier.
//!
//! # Algorithm
//!
//! `GreedySelector` repeatedly commits the device covering the most
//! still-uncovered lectures. The result is within a `1 - 1/e` factor of
//! the optimal maximum coverage, and within `ln n` of the minimum cover.
//!
//! # Verification
//!
//! `CoverageVerifier` recomputes coverage from the raw relation and
//! ignores lectures that nobody attends.
//!
//! # References
//!
//! - Johnson (1974), "Approximation Algorithms for Combinatorial Problems"
//! - Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"

mod bound;
mod greedy;
mod index;
mod tracker;
mod verify;

pub use bound::BoundTracker;
pub use greedy::{GreedySelector, Selection, SelectionConfig, SelectionRound, TieBreak};
pub use index::{AttendanceIndex, DeviceAttendance};
pub use tracker::CoverageTracker;
pub use verify::{CoverageVerifier, Verification};

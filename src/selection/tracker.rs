//! Per-lecture coverage state.

use std::collections::HashMap;

use crate::models::{Lecture, LectureId};

/// Tracks which lectures have been covered by a selected device.
///
/// The tracker exclusively owns coverage state. A lecture's flag flips
/// from uncovered to covered at most once and never reverts.
#[derive(Debug, Clone, Default)]
pub struct CoverageTracker {
    covered: HashMap<LectureId, bool>,
    covered_count: usize,
}

impl CoverageTracker {
    /// Creates a tracker over a lecture catalog. Duplicate IDs collapse.
    pub fn new(lectures: &[Lecture]) -> Self {
        Self::from_ids(lectures.iter().map(|l| l.id.clone()))
    }

    /// Creates a tracker over bare lecture IDs.
    pub fn from_ids(ids: impl IntoIterator<Item = LectureId>) -> Self {
        let mut tracker = Self::default();
        for id in ids {
            tracker.register(id);
        }
        tracker
    }

    /// Adds a lecture to the universe as uncovered.
    ///
    /// Returns `false` if the lecture was already tracked.
    pub fn register(&mut self, id: LectureId) -> bool {
        if self.covered.contains_key(&id) {
            return false;
        }
        self.covered.insert(id, false);
        true
    }

    /// Whether the lecture has been covered. Unknown lectures are not.
    pub fn is_covered(&self, id: &str) -> bool {
        self.covered.get(id).copied().unwrap_or(false)
    }

    /// Whether the lecture belongs to the tracked catalog.
    pub fn is_tracked(&self, id: &str) -> bool {
        self.covered.contains_key(id)
    }

    /// Whether the lecture is in the catalog and still uncovered.
    pub fn is_pending(&self, id: &str) -> bool {
        matches!(self.covered.get(id), Some(false))
    }

    /// Marks a lecture covered.
    ///
    /// Idempotent. Returns `true` only when the flag actually flipped;
    /// unknown lectures are ignored.
    pub fn mark_covered(&mut self, id: &str) -> bool {
        match self.covered.get_mut(id) {
            Some(flag) if !*flag => {
                *flag = true;
                self.covered_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of covered lectures.
    pub fn covered_count(&self) -> usize {
        self.covered_count
    }

    /// Number of tracked lectures.
    pub fn total_count(&self) -> usize {
        self.covered.len()
    }

    /// Whether every tracked lecture is covered.
    pub fn is_complete(&self) -> bool {
        self.covered_count == self.covered.len()
    }

    /// Lectures still uncovered, sorted by ID.
    pub fn uncovered(&self) -> Vec<&LectureId> {
        let mut ids: Vec<&LectureId> = self
            .covered
            .iter()
            .filter(|(_, &covered)| !covered)
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }
}

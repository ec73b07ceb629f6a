//! Monotone upper bound on per-round coverage gain.
//!
//! The best gain of round k+1 can never exceed the winner's gain in
//! round k: covered lectures only accumulate, so every device's gain is
//! non-increasing round over round.

/// Non-increasing upper bound on the new lectures any device can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundTracker {
    bound: usize,
}

impl BoundTracker {
    /// Starts from the largest single-device attendance in the relation.
    pub fn init(max_attendance: usize) -> Self {
        Self {
            bound: max_attendance,
        }
    }

    /// Current bound.
    pub fn value(&self) -> usize {
        self.bound
    }

    /// Lowers the bound to the latest winner's gain. Never raises it.
    pub fn update(&mut self, new_attends: usize) -> usize {
        self.bound = self.bound.min(new_attends);
        self.bound
    }

    /// Whether a gain already reaches the bound, so nothing in this
    /// round can beat it.
    pub fn is_reached_by(&self, new_attends: usize) -> bool {
        new_attends >= self.bound
    }
}

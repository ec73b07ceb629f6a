//! Attendance index: device → set of attended lectures.
//!
//! Devices keep the order in which they first appear in the attendance
//! relation. That order is the scan order of the greedy selector, so a
//! run over the same input is repeatable.

use std::collections::{HashMap, HashSet};

use crate::error::CoverageResult;
use crate::models::{Attendance, DeviceId, LectureId};
use crate::validation::validate_attendance;

/// The lectures attended by one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAttendance {
    /// Attending device.
    pub device_id: DeviceId,
    /// Attended lectures, deduplicated.
    pub lectures: HashSet<LectureId>,
}

/// In-memory mapping from device to the set of lectures it attends.
///
/// Removal drops a device's whole edge-set and never reorders the
/// devices that remain.
#[derive(Debug, Clone, Default)]
pub struct AttendanceIndex {
    slots: Vec<Option<DeviceAttendance>>,
    positions: HashMap<DeviceId, usize>,
    remaining: usize,
}

impl AttendanceIndex {
    /// Builds the index from raw attendance pairs.
    ///
    /// Repeated pairs collapse into a single edge.
    ///
    /// # Errors
    /// [`CoverageError::InvalidInput`](crate::CoverageError::InvalidInput)
    /// if any pair has an empty identifier.
    pub fn build(pairs: &[Attendance]) -> CoverageResult<Self> {
        validate_attendance(pairs)?;

        let mut index = Self::default();
        for pair in pairs {
            let slot = match index.positions.get(&pair.device_id) {
                Some(&slot) => slot,
                None => {
                    let slot = index.slots.len();
                    index.slots.push(Some(DeviceAttendance {
                        device_id: pair.device_id.clone(),
                        lectures: HashSet::new(),
                    }));
                    index.positions.insert(pair.device_id.clone(), slot);
                    index.remaining += 1;
                    slot
                }
            };
            if let Some(entry) = index.slots[slot].as_mut() {
                entry.lectures.insert(pair.lecture_id.clone());
            }
        }
        Ok(index)
    }

    /// Number of devices still in the index.
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Whether no devices remain.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Lectures attended by a device, if it is still indexed.
    pub fn lectures_of(&self, device_id: &str) -> Option<&HashSet<LectureId>> {
        let slot = *self.positions.get(device_id)?;
        self.slots[slot].as_ref().map(|e| &e.lectures)
    }

    /// Remaining devices in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceAttendance> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Remaining devices with their stable slot numbers.
    pub(crate) fn iter_slots(&self) -> impl Iterator<Item = (usize, &DeviceAttendance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| e.as_ref().map(|e| (slot, e)))
    }

    /// Removes a device and its entire edge-set.
    ///
    /// Returns `None` if the device is unknown or was already removed.
    pub fn remove(&mut self, device_id: &str) -> Option<DeviceAttendance> {
        let slot = *self.positions.get(device_id)?;
        self.take_slot(slot)
    }

    pub(crate) fn take_slot(&mut self, slot: usize) -> Option<DeviceAttendance> {
        let taken = self.slots.get_mut(slot)?.take();
        if taken.is_some() {
            self.remaining -= 1;
        }
        taken
    }

    /// Largest number of distinct lectures any remaining device attends.
    pub fn max_attendance(&self) -> usize {
        self.iter().map(|e| e.lectures.len()).max().unwrap_or(0)
    }

    /// Number of distinct (device, lecture) edges still indexed.
    pub fn edge_count(&self) -> usize {
        self.iter().map(|e| e.lectures.len()).sum()
    }

    /// Every lecture attended by at least one remaining device.
    pub fn attended_lectures(&self) -> HashSet<&LectureId> {
        self.iter().flat_map(|e| e.lectures.iter()).collect()
    }
}

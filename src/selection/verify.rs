//! Independent completeness check for a selection.
//!
//! Recomputes coverage from the raw attendance relation instead of
//! trusting the selector's coverage flags, so a faulty selection loop
//! cannot certify itself.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Attendance, DeviceId, Lecture, LectureId};

/// Result of a coverage verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Lectures attended by at least one device in the full relation.
    pub coverable_count: usize,
    /// Coverable lectures attended by at least one selected device.
    pub covered_count: usize,
    /// Coverable lectures no selected device attends, sorted.
    pub missing: Vec<LectureId>,
    /// Catalog lectures nobody attends, sorted. Empty when no catalog
    /// was supplied.
    pub unreachable: Vec<LectureId>,
    /// Attended lectures missing from the catalog, sorted. They are
    /// outside the coverable universe. Empty when no catalog was supplied.
    pub uncatalogued: Vec<LectureId>,
}

impl Verification {
    /// Whether the selection covers the whole coverable universe.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Checks a selection against the full attendance relation.
///
/// # Example
///
/// ```
/// use u_coverage::models::{Attendance, DeviceId};
/// use u_coverage::selection::CoverageVerifier;
///
/// let relation = vec![Attendance::new("D1", "L1"), Attendance::new("D2", "L2")];
/// let verifier = CoverageVerifier::new(&relation);
///
/// assert!(verifier.is_fully_covered(&[DeviceId::new("D1"), DeviceId::new("D2")]));
/// assert!(!verifier.is_fully_covered(&[DeviceId::new("D1")]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CoverageVerifier<'a> {
    relation: &'a [Attendance],
    catalog: Option<&'a [Lecture]>,
}

impl<'a> CoverageVerifier<'a> {
    /// Creates a verifier over the full, unmodified attendance relation.
    pub fn new(relation: &'a [Attendance]) -> Self {
        Self {
            relation,
            catalog: None,
        }
    }

    /// Attaches the lecture catalog.
    ///
    /// The coverable universe is then limited to catalog lectures, and
    /// unreachable and uncatalogued lectures are reported.
    pub fn with_catalog(mut self, lectures: &'a [Lecture]) -> Self {
        self.catalog = Some(lectures);
        self
    }

    /// Every lecture attended by at least one device, restricted to the
    /// catalog when one is attached.
    pub fn coverable_universe(&self) -> HashSet<&'a LectureId> {
        let attended = self.relation.iter().map(|p| &p.lecture_id);
        match self.catalog {
            Some(catalog) => {
                let known: HashSet<&LectureId> = catalog.iter().map(|l| &l.id).collect();
                attended.filter(|l| known.contains(l)).collect()
            }
            None => attended.collect(),
        }
    }

    /// Verifies a selection.
    pub fn verify(&self, selected: &[DeviceId]) -> Verification {
        let selected: HashSet<&DeviceId> = selected.iter().collect();
        let coverable = self.coverable_universe();
        let covered: HashSet<&LectureId> = self
            .relation
            .iter()
            .filter(|p| selected.contains(&p.device_id))
            .map(|p| &p.lecture_id)
            .filter(|l| coverable.contains(l))
            .collect();

        let mut missing: Vec<LectureId> = coverable
            .difference(&covered)
            .map(|&l| l.clone())
            .collect();
        missing.sort();

        let mut unreachable: Vec<LectureId> = self
            .catalog
            .unwrap_or_default()
            .iter()
            .map(|l| &l.id)
            .filter(|id| !coverable.contains(id))
            .collect::<HashSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        unreachable.sort();

        let mut uncatalogued: Vec<LectureId> = match self.catalog {
            Some(_) => self
                .relation
                .iter()
                .map(|p| &p.lecture_id)
                .filter(|l| !coverable.contains(l))
                .collect::<HashSet<_>>()
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        uncatalogued.sort();

        Verification {
            coverable_count: coverable.len(),
            covered_count: covered.len(),
            missing,
            unreachable,
            uncatalogued,
        }
    }

    /// Whether the selected devices attend every coverable lecture.
    pub fn is_fully_covered(&self, selected: &[DeviceId]) -> bool {
        self.verify(selected).is_complete()
    }
}

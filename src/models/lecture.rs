//! Lecture model.
//!
//! Lectures are the elements to be covered. A lecture carries only an
//! identity and catalog metadata; coverage state lives in
//! [`CoverageTracker`](crate::selection::CoverageTracker), never on the
//! lecture itself.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, unique lecture identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LectureId(String);

impl LectureId {
    /// Creates a lecture identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (malformed input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LectureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LectureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LectureId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Academic term a lecture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    /// Winter term.
    Winter,
    /// Summer term.
    Summer,
}

/// A lecture in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    /// Unique lecture identifier.
    pub id: LectureId,
    /// Academic year, if known.
    #[serde(default)]
    pub year: Option<i16>,
    /// Term, if known.
    #[serde(default)]
    pub semester: Option<Semester>,
}

impl Lecture {
    /// Creates a lecture with the given ID.
    pub fn new(id: impl Into<LectureId>) -> Self {
        Self {
            id: id.into(),
            year: None,
            semester: None,
        }
    }

    /// Sets the academic year.
    pub fn with_year(mut self, year: i16) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the term.
    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lecture_builder() {
        let l = Lecture::new("L1")
            .with_year(2023)
            .with_semester(Semester::Winter);

        assert_eq!(l.id.as_str(), "L1");
        assert_eq!(l.year, Some(2023));
        assert_eq!(l.semester, Some(Semester::Winter));
    }

    #[test]
    fn test_lecture_id_serializes_transparently() {
        let l = Lecture::new("L7").with_semester(Semester::Summer);
        let json = serde_json::to_string(&l).unwrap();
        assert!(json.contains("\"id\":\"L7\""));
        assert!(json.contains("\"semester\":\"summer\""));

        let parsed: Lecture = serde_json::from_str(r#"{"id":"L9"}"#).unwrap();
        assert_eq!(parsed, Lecture::new("L9"));
    }

    #[test]
    fn test_empty_id() {
        assert!(LectureId::new("").is_empty());
        assert!(!LectureId::from("x").is_empty());
    }
}

//! # Course Module
//!
//! A single row of user-entered course data.

use crate::grade::Grade;
use crate::units::{Credits, Marks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course as entered. Any field may still be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub credits: Credits,
    pub marks: Option<Marks>,
    pub grade: Option<Grade>,
}

impl Course {
    /// A blank course row.
    #[must_use]
    pub fn new(id: CourseId) -> Self {
        Self {
            id,
            name: String::new(),
            credits: Credits::ZERO,
            marks: None,
            grade: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_credits(mut self, credits: Credits) -> Self {
        self.credits = credits;
        self
    }

    #[must_use]
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.set_grade(grade);
        self
    }

    #[must_use]
    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.set_marks(marks);
        self
    }

    /// Record marks and overwrite the grade with the one they derive.
    ///
    /// Returns the derived grade.
    pub fn set_marks(&mut self, marks: Marks) -> Grade {
        let grade = Grade::from_marks(marks);
        self.marks = Some(marks);
        self.grade = Some(grade);
        grade
    }

    /// Select a grade directly. Marks are left untouched; the grade wins
    /// until marks are entered again.
    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = Some(grade);
    }

    /// Complete = non-blank name, positive credits, and a grade.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.credits.is_positive() && self.grade.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================

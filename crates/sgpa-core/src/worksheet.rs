//! # Worksheet Module
//!
//! In-memory form state: the course list and the selected faculty.
//!
//! The worksheet owns its rows exclusively and is mutated one edit at a time.
//! It never persists anything; dropping it discards the session.

use crate::course::{Course, CourseId};
use crate::engine::{CalculationResult, SgpaEngine};
use crate::error::{Result, SgpaError};
use crate::grade::Grade;
use crate::units::{Credits, Marks};

/// Course rows plus faculty selection for one session.
#[derive(Debug, Clone)]
pub struct Worksheet {
    courses: Vec<Course>,
    faculty: Option<String>,
    next_id: u64,
    engine: SgpaEngine,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Worksheet {
    /// A worksheet with one blank row and no faculty selected.
    #[must_use]
    pub fn new() -> Self {
        let mut sheet = Self {
            courses: Vec::new(),
            faculty: None,
            next_id: 1,
            engine: SgpaEngine::standard(),
        };
        sheet.add_course();
        sheet
    }

    /// Append a blank row and return its id. Ids are never reused.
    pub fn add_course(&mut self) -> CourseId {
        let id = CourseId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.courses.push(Course::new(id));
        id
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn delete_course(&mut self, id: CourseId) -> Result<Course> {
        let index = self.index_of(id)?;
        if self.courses.len() == 1 {
            return Err(SgpaError::LastCourse);
        }
        Ok(self.courses.remove(index))
    }

    pub fn set_name(&mut self, id: CourseId, name: impl Into<String>) -> Result<()> {
        self.course_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_credits(&mut self, id: CourseId, credits: Credits) -> Result<()> {
        self.course_mut(id)?.credits = credits;
        Ok(())
    }

    /// Record marks; the derived grade replaces whatever grade was there.
    pub fn set_marks(&mut self, id: CourseId, marks: Marks) -> Result<Grade> {
        Ok(self.course_mut(id)?.set_marks(marks))
    }

    /// Select a grade directly, replacing any marks-derived grade.
    pub fn set_grade(&mut self, id: CourseId, grade: Grade) -> Result<()> {
        self.course_mut(id)?.set_grade(grade);
        Ok(())
    }

    /// Select a faculty by id, or clear the selection. Blank clears too.
    pub fn select_faculty(&mut self, faculty: Option<&str>) {
        self.faculty = faculty
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
    }

    /// The current faculty selector, as entered.
    #[must_use]
    pub fn faculty(&self) -> Option<&str> {
        self.faculty.as_deref()
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look up a row.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Number of rows that would be counted by a calculation.
    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.courses.iter().filter(|c| c.is_complete()).count()
    }

    /// Run the engine over the current rows and faculty.
    pub fn calculate(&self) -> Result<CalculationResult> {
        self.engine.compute(&self.courses, self.faculty())
    }

    fn index_of(&self, id: CourseId) -> Result<usize> {
        self.courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(SgpaError::CourseNotFound(id))
    }

    fn course_mut(&mut self, id: CourseId) -> Result<&mut Course> {
        self.courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SgpaError::CourseNotFound(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================

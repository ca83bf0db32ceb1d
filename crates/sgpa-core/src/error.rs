//! # Error Module
//!
//! The single error type of the SGPA core.
//!
//! A calculation fails with [`SgpaError::Validation`], or with
//! [`SgpaError::CreditsOverflow`] for credit totals past `u64`. Every other
//! variant is raised while building course data at the input boundary.

use crate::course::CourseId;
use thiserror::Error;

/// Errors produced by the SGPA core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SgpaError {
    /// The calculation was asked for with zero complete courses.
    ///
    /// A course is complete when it has a non-blank name, positive credits
    /// and a grade.
    #[error("no complete course entries: add at least one course with name, credits, and grade")]
    Validation,

    /// Total credits of the counted courses do not fit in a `u64`.
    #[error("total credits too large to calculate")]
    CreditsOverflow,

    /// A numeric field could not be parsed.
    #[error(
        "invalid number '{0}': expected a non-negative decimal with at most two decimal places"
    )]
    InvalidNumber(String),

    /// Marks outside 0-100.
    #[error("marks {0} out of range 0-100")]
    MarksOutOfRange(String),

    /// A letter grade that is not on the grade scale.
    #[error("unknown grade '{0}' (expected one of A+, A, A-, B+, B, B-, C+, C, D, F)")]
    UnknownGrade(String),

    /// No course with this id in the worksheet.
    #[error("course {0} not found")]
    CourseNotFound(CourseId),

    /// The worksheet always keeps at least one course row.
    #[error("cannot delete the only remaining course")]
    LastCourse,
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, SgpaError>;

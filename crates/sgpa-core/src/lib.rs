//! # SGPA Core
//!
//! Deterministic engine for semester grade-point averages and tuition-waiver
//! eligibility.
//!
//! ```text
//! courses ──► filter complete ──► Σ points×credits / Σ credits ──► Sgpa
//!                                                                   │
//! faculty ──► FacultyPolicy ──► highest threshold met ◄─────────────┘
//!                                        │
//!                                        ▼
//!                               CalculationResult
//! ```
//!
//! Everything here is pure: no I/O, no logging, no floating-point arithmetic
//! outside the serialization edge. The grade scale and faculty policies are
//! compiled-in constants.

pub mod course;
pub mod engine;
pub mod error;
pub mod grade;
pub mod policy;
pub mod report;
pub mod units;
pub mod worksheet;

pub use course::{Course, CourseId};
pub use engine::{CalculationResult, Sgpa, SgpaEngine, Waiver, compute_sgpa};
pub use error::{Result, SgpaError};
pub use grade::{Grade, GradeScale, STANDARD_SCALE};
pub use policy::{FACULTY_POLICIES, FacultyPolicy, WaiverRule};
pub use report::WaiverOutcome;
pub use units::{Credits, GradePoint, Marks};
pub use worksheet::Worksheet;

//! # SGPA Engine
//!
//! The pure calculation: credit-weighted grade points over complete courses,
//! followed by waiver resolution against a faculty policy.
//!
//! SGPA is kept as an exact ratio of integer totals. Threshold checks
//! cross-multiply instead of dividing, so a 3.8999 average never lands in a
//! 3.90 tier.

use crate::course::Course;
use crate::error::{Result, SgpaError};
use crate::grade::{GradeScale, STANDARD_SCALE};
use crate::policy::{FACULTY_POLICIES, FacultyPolicy};
use crate::units::{Credits, GradePoint, format_hundredths};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// SGPA
// =============================================================================

/// Semester grade-point average as an exact ratio.
///
/// `weighted_points` is Σ(grade point × credits) with both factors in
/// hundredths; `credits` is Σ credits in hundredths. The value in grade-point
/// hundredths is `weighted_points / credits`.
///
/// `weighted_points` is `u128` so that any credit total that fits a `u64`
/// times the top grade point is still exact.
#[derive(Debug, Clone, Copy)]
pub struct Sgpa {
    weighted_points: u128,
    credits: u64,
}

impl Sgpa {
    /// 0.00, used when no credits were counted.
    pub const ZERO: Self = Self {
        weighted_points: 0,
        credits: 0,
    };

    /// Build from accumulated totals.
    #[must_use]
    pub const fn from_totals(weighted_points: u128, credits: u64) -> Self {
        Self {
            weighted_points,
            credits,
        }
    }

    /// Numerator and denominator, normalising the zero-credit case to 0/1.
    fn ratio(&self) -> (u128, u128) {
        if self.credits == 0 {
            (0, 1)
        } else {
            (self.weighted_points, u128::from(self.credits))
        }
    }

    /// Whole part and remainder of `num / den`. The remainder is below a
    /// `u64` denominator, so products of a remainder and a denominator fit.
    fn split(&self) -> (u128, u128, u128) {
        let (num, den) = self.ratio();
        (num / den, num % den, den)
    }

    /// Whether the SGPA is at or above a threshold.
    #[must_use]
    pub fn meets(&self, threshold: GradePoint) -> bool {
        let (num, den) = self.ratio();
        num >= u128::from(threshold.hundredths()) * den
    }

    /// Value in grade-point hundredths, rounded half up (`3.295` -> `330`).
    #[must_use]
    pub fn rounded_hundredths(&self) -> u64 {
        let (whole, rem, den) = self.split();
        let rounded = whole + u128::from(2 * rem >= den);
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }

    /// Floating-point view for serialization.
    #[allow(clippy::float_arithmetic)]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        let (num, den) = self.ratio();
        num as f64 / den as f64 / 100.0
    }

    /// Σ(grade point × credits), both in hundredths.
    #[must_use]
    pub const fn weighted_points(&self) -> u128 {
        self.weighted_points
    }

    /// Σ credits in hundredths.
    #[must_use]
    pub const fn credits(&self) -> u64 {
        self.credits
    }
}

impl PartialEq for Sgpa {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Sgpa {}

impl PartialOrd for Sgpa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sgpa {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_whole, a_rem, a_den) = self.split();
        let (b_whole, b_rem, b_den) = other.split();
        a_whole
            .cmp(&b_whole)
            .then_with(|| (a_rem * b_den).cmp(&(b_rem * a_den)))
    }
}

impl fmt::Display for Sgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hundredths(self.rounded_hundredths()))
    }
}

impl Serialize for Sgpa {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Waiver granted by a faculty policy. A percentage of 0 means the policy was
/// applied but no tier was met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waiver {
    pub percentage: u8,
    pub faculty: String,
}

/// Output of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResult {
    pub sgpa: Sgpa,
    /// `None` when no known faculty was selected.
    pub waiver: Option<Waiver>,
    /// Number of complete courses that were counted.
    pub courses_counted: usize,
    /// Credits across the counted courses.
    pub total_credits: Credits,
}

// =============================================================================
// ENGINE
// =============================================================================

/// The engine owns the static tables it computes against.
#[derive(Debug, Clone, Copy)]
pub struct SgpaEngine {
    scale: GradeScale,
    policies: &'static [FacultyPolicy],
}

impl Default for SgpaEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl SgpaEngine {
    /// Engine over the standard grade scale and faculty policies.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            scale: STANDARD_SCALE,
            policies: FACULTY_POLICIES,
        }
    }

    /// The grade scale in use.
    #[must_use]
    pub const fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// The faculty policies in use.
    #[must_use]
    pub const fn policies(&self) -> &'static [FacultyPolicy] {
        self.policies
    }

    /// Resolve a faculty selector. Blank or unknown selectors give `None`.
    #[must_use]
    pub fn policy(&self, faculty: Option<&str>) -> Option<&'static FacultyPolicy> {
        FacultyPolicy::lookup(self.policies, faculty?)
    }

    /// Compute SGPA and waiver for a set of courses.
    ///
    /// Incomplete courses are skipped. Fails with [`SgpaError::Validation`]
    /// when none are complete, and with [`SgpaError::CreditsOverflow`] when
    /// the credit total does not fit in a `u64`.
    pub fn compute(&self, courses: &[Course], faculty: Option<&str>) -> Result<CalculationResult> {
        let mut weighted_points: u128 = 0;
        let mut credits: u64 = 0;
        let mut counted = 0usize;

        for course in courses.iter().filter(|c| c.is_complete()) {
            let points = course
                .grade
                .map(|g| self.scale.points(g))
                .unwrap_or(GradePoint::ZERO);
            let course_credits = course.credits.hundredths();

            // Bounded by 400 * u64::MAX while credits fit a u64.
            weighted_points += u128::from(points.hundredths()) * u128::from(course_credits);
            credits = credits
                .checked_add(course_credits)
                .ok_or(SgpaError::CreditsOverflow)?;
            counted += 1;
        }

        if counted == 0 {
            return Err(SgpaError::Validation);
        }

        let sgpa = if credits > 0 {
            Sgpa::from_totals(weighted_points, credits)
        } else {
            Sgpa::ZERO
        };

        let waiver = self.policy(faculty).map(|policy| Waiver {
            percentage: policy.percentage_for(&sgpa),
            faculty: policy.name.to_string(),
        });

        Ok(CalculationResult {
            sgpa,
            waiver,
            courses_counted: counted,
            total_credits: Credits::from_hundredths(credits),
        })
    }
}

/// Compute with the standard tables.
pub fn compute_sgpa(courses: &[Course], faculty: Option<&str>) -> Result<CalculationResult> {
    SgpaEngine::standard().compute(courses, faculty)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::course::CourseId;
    use crate::grade::Grade;
    use crate::units::Marks;

    fn course(id: u64, name: &str, credits: u64, grade: Grade) -> Course {
        Course::new(CourseId(id))
            .with_name(name)
            .with_credits(Credits::whole(credits))
            .with_grade(grade)
    }

    /// Numbered courses from (credits, grade) pairs.
    fn single_at(points: &[(u64, Grade)]) -> Vec<Course> {
        points
            .iter()
            .enumerate()
            .map(|(i, (credits, grade))| course(i as u64, "Course", *credits, *grade))
            .collect()
    }

    #[test]
    fn single_course_a() {
        let result = compute_sgpa(&[course(1, "Physics", 3, Grade::A)], None).unwrap();
        assert_eq!(result.sgpa.to_string(), "3.75");
        assert_eq!(result.courses_counted, 1);
        assert_eq!(result.total_credits, Credits::whole(3));
    }

    #[test]
    fn two_courses_weighted() {
        let courses = [
            course(1, "Calculus", 3, Grade::APlus),
            course(2, "History", 2, Grade::C),
        ];
        let result = compute_sgpa(&courses, None).unwrap();
        // 3 * 4.00 + 2 * 2.25 = 16.50 over 5 credits
        assert_eq!(result.sgpa.weighted_points(), 165_000);
        assert_eq!(result.sgpa.credits(), 500);
        assert_eq!(result.sgpa.to_string(), "3.30");
    }

    #[test]
    fn engineering_395_gets_30() {
        // 3 * 4.00 + 1 * 3.75 = 15.75 / 4 = 3.9375
        let courses = single_at(&[(3, Grade::APlus), (1, Grade::A)]);
        let result = compute_sgpa(&courses, Some("be-sit-ahs-eng")).unwrap();
        assert_eq!(
            result.waiver,
            Some(Waiver {
                percentage: 30,
                faculty: "BE, SIT, AHS, Engineering".to_string()
            })
        );
    }

    #[test]
    fn engineering_below_tiers_names_faculty() {
        // 3.50 + 3.75 + 3.75 + 3.75 = 14.75 / 4 = 3.6875
        let courses = single_at(&[
            (1, Grade::AMinus),
            (1, Grade::A),
            (1, Grade::A),
            (1, Grade::A),
        ]);
        let result = compute_sgpa(&courses, Some("be-sit-ahs-eng")).unwrap();
        let waiver = result.waiver.unwrap();
        assert_eq!(waiver.percentage, 0);
        assert_eq!(waiver.faculty, "BE, SIT, AHS, Engineering");
    }

    #[test]
    fn no_faculty_no_waiver() {
        let courses = single_at(&[(3, Grade::APlus), (1, Grade::A)]);
        assert!(compute_sgpa(&courses, None).unwrap().waiver.is_none());
        assert!(compute_sgpa(&courses, Some("")).unwrap().waiver.is_none());
        assert!(compute_sgpa(&courses, Some("law")).unwrap().waiver.is_none());
    }

    #[test]
    fn perfect_score_top_tier() {
        let courses = single_at(&[(3, Grade::APlus), (2, Grade::APlus)]);
        let result = compute_sgpa(&courses, Some("be-sit-ahs-eng")).unwrap();
        assert_eq!(result.sgpa.to_string(), "4.00");
        assert_eq!(result.waiver.unwrap().percentage, 50);
    }

    #[test]
    fn marks_derived_grade_counts() {
        let c = Course::new(CourseId(1))
            .with_name("Algorithms")
            .with_credits(Credits::whole(4))
            .with_marks(Marks::whole(82).unwrap());
        let result = compute_sgpa(&[c], None).unwrap();
        // 4 * 4.00 = 16.00 grade points
        assert_eq!(result.sgpa.weighted_points(), 400 * 400);
        assert_eq!(result.sgpa.to_string(), "4.00");
    }

    #[test]
    fn incomplete_courses_are_skipped() {
        let courses = vec![
            course(1, "Chemistry", 3, Grade::B),
            Course::new(CourseId(2)).with_name("Unfinished"),
            course(3, "  ", 3, Grade::F),
        ];
        let result = compute_sgpa(&courses, None).unwrap();
        assert_eq!(result.courses_counted, 1);
        assert_eq!(result.sgpa.to_string(), "3.00");
    }

    #[test]
    fn all_incomplete_is_validation_error() {
        let courses = vec![
            Course::new(CourseId(1)),
            Course::new(CourseId(2))
                .with_name("No grade")
                .with_credits(Credits::whole(3)),
            Course::new(CourseId(3)).with_grade(Grade::A),
        ];
        assert_eq!(compute_sgpa(&courses, None), Err(SgpaError::Validation));
        assert_eq!(compute_sgpa(&[], Some("be-sit-ahs-eng")), Err(SgpaError::Validation));
    }

    #[test]
    fn idempotent() {
        let courses = single_at(&[(3, Grade::BPlus), (2, Grade::AMinus)]);
        let first = compute_sgpa(&courses, Some("humanities-social"));
        let second = compute_sgpa(&courses, Some("humanities-social"));
        assert_eq!(first, second);
    }

    #[test]
    fn sgpa_zero_guard() {
        assert_eq!(Sgpa::ZERO.rounded_hundredths(), 0);
        assert!(Sgpa::ZERO.meets(GradePoint::ZERO));
        assert!(!Sgpa::ZERO.meets(GradePoint::from_hundredths(1)));
        assert_eq!(Sgpa::ZERO.to_string(), "0.00");
    }

    #[test]
    fn sgpa_equality_is_by_value() {
        assert_eq!(Sgpa::from_totals(375, 1), Sgpa::from_totals(750, 2));
        assert!(Sgpa::from_totals(400, 1) > Sgpa::from_totals(399, 1));
    }

    #[test]
    fn huge_credits_stay_exact() {
        let big: Credits = "100000000000000000".parse().unwrap();
        let courses = [Course::new(CourseId(1))
            .with_name("Big")
            .with_credits(big)
            .with_grade(Grade::APlus)];
        let result = compute_sgpa(&courses, Some("be-sit-ahs-eng")).unwrap();
        assert_eq!(result.sgpa.to_string(), "4.00");
        assert_eq!(result.waiver.unwrap().percentage, 50);
        assert_eq!(result.total_credits, big);

        // F, F, A+ over 1e15 + 1e15 + 1 credits stays just above zero
        let heavy: Credits = "1000000000000000".parse().unwrap();
        let courses = [
            Course::new(CourseId(1)).with_name("F1").with_credits(heavy).with_grade(Grade::F),
            Course::new(CourseId(2)).with_name("F2").with_credits(heavy).with_grade(Grade::F),
            course(3, "Top", 1, Grade::APlus),
        ];
        let result = compute_sgpa(&courses, None).unwrap();
        assert_eq!(result.sgpa.credits(), 200_000_000_000_000_100);
        assert_eq!(result.sgpa.weighted_points(), 40_000);
        assert!(result.sgpa.meets(GradePoint::ZERO));
        assert!(!result.sgpa.meets(GradePoint::from_hundredths(1)));
    }

    #[test]
    fn credit_total_overflow_is_an_error() {
        let max = Credits::from_hundredths(u64::MAX);
        let courses = [
            Course::new(CourseId(1)).with_name("A").with_credits(max).with_grade(Grade::A),
            Course::new(CourseId(2)).with_name("B").with_credits(max).with_grade(Grade::B),
        ];
        assert_eq!(compute_sgpa(&courses, None), Err(SgpaError::CreditsOverflow));
    }

    #[test]
    fn ordering_with_large_denominators() {
        let max = u64::MAX;
        let top = Sgpa::from_totals(400 * u128::from(max), max);
        let below = Sgpa::from_totals(400 * u128::from(max) - 1, max);
        assert_eq!(top, Sgpa::from_totals(400, 1));
        assert!(below < top);
        assert!(below > Sgpa::from_totals(399, 1));
        assert_eq!(top.rounded_hundredths(), 400);
    }

    #[test]
    fn half_up_rounding() {
        // 3.295 -> 3.30
        assert_eq!(Sgpa::from_totals(3295, 10).to_string(), "3.30");
        // 3.294 -> 3.29
        assert_eq!(Sgpa::from_totals(3294, 10).to_string(), "3.29");
    }

    #[test]
    fn result_serializes() {
        let result = compute_sgpa(&[course(1, "Physics", 3, Grade::A)], Some("be-sit-ahs-eng"))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sgpa"], serde_json::json!(3.75));
        assert_eq!(json["waiver"]["percentage"], serde_json::json!(0));
        assert_eq!(json["courses_counted"], serde_json::json!(1));
    }
}

//! # Grade Module
//!
//! Letter grades, the fixed grade scale, and the marks-to-grade ladder.

use crate::error::SgpaError;
use crate::units::{GradePoint, Marks};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LETTER GRADE
// =============================================================================

/// A letter grade on the scale. Unknown letters are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 10] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    /// The label shown to users ("A+", "B-", ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Derive a grade from marks using the descending ladder.
    ///
    /// Bounds are inclusive lower limits; anything under 40 is an F.
    #[must_use]
    pub fn from_marks(marks: Marks) -> Grade {
        MARKS_LADDER
            .iter()
            .find(|(lower, _)| marks.hundredths() >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }
}

impl FromStr for Grade {
    type Err = SgpaError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SgpaError::UnknownGrade(wanted.to_string()))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Marks ladder: (inclusive lower bound in hundredths, grade), highest first.
const MARKS_LADDER: [(u16, Grade); 9] = [
    (8000, Grade::APlus),
    (7500, Grade::A),
    (7000, Grade::AMinus),
    (6500, Grade::BPlus),
    (6000, Grade::B),
    (5500, Grade::BMinus),
    (5000, Grade::CPlus),
    (4500, Grade::C),
    (4000, Grade::D),
];

// =============================================================================
// GRADE SCALE
// =============================================================================

/// Fixed mapping from letter grade to grade point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeScale {
    entries: &'static [(Grade, GradePoint)],
}

/// The grade scale every calculation uses.
pub const STANDARD_SCALE: GradeScale = GradeScale {
    entries: &[
        (Grade::APlus, GradePoint::from_hundredths(400)),
        (Grade::A, GradePoint::from_hundredths(375)),
        (Grade::AMinus, GradePoint::from_hundredths(350)),
        (Grade::BPlus, GradePoint::from_hundredths(325)),
        (Grade::B, GradePoint::from_hundredths(300)),
        (Grade::BMinus, GradePoint::from_hundredths(275)),
        (Grade::CPlus, GradePoint::from_hundredths(250)),
        (Grade::C, GradePoint::from_hundredths(225)),
        (Grade::D, GradePoint::from_hundredths(200)),
        (Grade::F, GradePoint::ZERO),
    ],
};

impl Default for GradeScale {
    fn default() -> Self {
        STANDARD_SCALE
    }
}

impl GradeScale {
    /// Grade point for a grade. A grade missing from the table scores 0.00.
    #[must_use]
    pub fn points(&self, grade: Grade) -> GradePoint {
        self.entries
            .iter()
            .find(|(g, _)| *g == grade)
            .map(|(_, p)| *p)
            .unwrap_or(GradePoint::ZERO)
    }

    /// Grade point for a raw label. Unrecognized labels score 0.00.
    #[must_use]
    pub fn points_for_label(&self, label: &str) -> GradePoint {
        label
            .parse::<Grade>()
            .map(|g| self.points(g))
            .unwrap_or(GradePoint::ZERO)
    }

    /// Iterate the table, best grade first.
    pub fn entries(&self) -> impl Iterator<Item = (Grade, GradePoint)> + '_ {
        self.entries.iter().copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scale_values() {
        let expected = [
            ("A+", 400),
            ("A", 375),
            ("A-", 350),
            ("B+", 325),
            ("B", 300),
            ("B-", 275),
            ("C+", 250),
            ("C", 225),
            ("D", 200),
            ("F", 0),
        ];
        for (label, hundredths) in expected {
            let grade: Grade = label.parse().unwrap();
            assert_eq!(STANDARD_SCALE.points(grade).hundredths(), hundredths, "{label}");
        }
    }

    #[test]
    fn unknown_label_scores_zero() {
        assert_eq!(STANDARD_SCALE.points_for_label("Z"), GradePoint::ZERO);
        assert_eq!(STANDARD_SCALE.points_for_label(""), GradePoint::ZERO);
        assert_eq!(STANDARD_SCALE.points_for_label("b+").hundredths(), 325);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("a-".parse::<Grade>(), Ok(Grade::AMinus));
        assert_eq!(" c+ ".parse::<Grade>(), Ok(Grade::CPlus));
        assert_eq!(
            "E".parse::<Grade>(),
            Err(SgpaError::UnknownGrade("E".to_string()))
        );
    }

    #[test]
    fn marks_ladder_boundaries() {
        let cases = [
            (100, Grade::APlus),
            (82, Grade::APlus),
            (80, Grade::APlus),
            (79, Grade::A),
            (75, Grade::A),
            (74, Grade::AMinus),
            (70, Grade::AMinus),
            (65, Grade::BPlus),
            (60, Grade::B),
            (55, Grade::BMinus),
            (50, Grade::CPlus),
            (45, Grade::C),
            (44, Grade::D),
            (40, Grade::D),
            (39, Grade::F),
            (0, Grade::F),
        ];
        for (marks, grade) in cases {
            assert_eq!(Grade::from_marks(Marks::whole(marks).unwrap()), grade, "{marks}");
        }
    }

    #[test]
    fn fractional_marks_below_bound() {
        let marks: Marks = "79.99".parse().unwrap();
        assert_eq!(Grade::from_marks(marks), Grade::A);
    }

    #[test]
    fn serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Grade::BMinus).unwrap(), "\"B-\"");
        let parsed: Grade = serde_json::from_str("\"A+\"").unwrap();
        assert_eq!(parsed, Grade::APlus);
    }
}

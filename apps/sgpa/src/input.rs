//! # Course Input
//!
//! Parsing of course data from the command line and from files.
//!
//! Text format, one course per line:
//!
//! ```text
//! # name:credits:grade-or-marks
//! Data Structures:3:A
//! Calculus I:4:82
//! ```
//!
//! The line is split on its last two colons so names may contain colons.
//! A numeric third field is marks (the grade is derived from it).
//!
//! JSON format is an array of `{ "name", "credits", "marks"?, "grade"? }`.
//! Marks are applied before an explicit grade, so the grade wins.

use crate::error::{CliError, Result};
use serde::Deserialize;
use sgpa_core::{Course, CourseId, Credits, Grade, Marks};
use tracing::debug;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Pick by file extension (`.json` is JSON, anything else text).
    Auto,
    Text,
    Json,
}

impl InputFormat {
    /// Resolve `Auto` against a file name.
    #[must_use]
    pub fn resolve(self, path: &std::path::Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Text
                }
            }
            other => other,
        }
    }
}

/// Parse one `name:credits:grade-or-marks` spec.
///
/// Empty credits or grade fields leave the course incomplete rather than
/// failing; malformed values fail.
pub fn parse_course_spec(spec: &str, id: CourseId) -> std::result::Result<Course, String> {
    let mut parts = spec.rsplitn(3, ':');
    let (Some(third), Some(credits), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "expected NAME:CREDITS:GRADE_OR_MARKS, got '{}'",
            spec.trim()
        ));
    };

    let mut course = Course::new(id).with_name(name.trim());

    if !credits.trim().is_empty() {
        let credits: Credits = credits.parse().map_err(|e| format!("credits: {e}"))?;
        course = course.with_credits(credits);
    }

    let third = third.trim();
    if looks_numeric(third) {
        let marks: Marks = third.parse().map_err(|e| format!("marks: {e}"))?;
        course.set_marks(marks);
    } else if !third.is_empty() {
        let grade: Grade = third.parse().map_err(|e| format!("grade: {e}"))?;
        course.set_grade(grade);
    }

    Ok(course)
}

fn looks_numeric(field: &str) -> bool {
    field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
}

/// Parse text-format content. Blank lines and `#` comments are skipped.
pub fn parse_text(content: &str, first_id: u64) -> Result<Vec<Course>> {
    let mut courses = Vec::new();
    let mut next_id = first_id;

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let course = parse_course_spec(trimmed, CourseId(next_id))
            .map_err(|message| CliError::input(index + 1, message))?;
        next_id += 1;
        courses.push(course);
    }

    debug!(count = courses.len(), "parsed text course input");
    Ok(courses)
}

/// One course object in JSON input.
#[derive(Debug, Deserialize)]
struct CourseInput {
    #[serde(default)]
    name: String,
    #[serde(default)]
    credits: Credits,
    #[serde(default)]
    marks: Option<Marks>,
    #[serde(default)]
    grade: Option<Grade>,
}

/// Parse JSON-format content.
pub fn parse_json(content: &str, first_id: u64) -> Result<Vec<Course>> {
    let inputs: Vec<CourseInput> = serde_json::from_str(content)?;

    let courses: Vec<Course> = inputs
        .into_iter()
        .zip(first_id..)
        .map(|(input, id)| {
            let mut course = Course::new(CourseId(id))
                .with_name(input.name)
                .with_credits(input.credits);
            if let Some(marks) = input.marks {
                course.set_marks(marks);
            }
            if let Some(grade) = input.grade {
                course.set_grade(grade);
            }
            course
        })
        .collect();

    debug!(count = courses.len(), "parsed JSON course input");
    Ok(courses)
}

/// Parse file content in the given (already resolved) format.
pub fn parse_courses(content: &str, format: InputFormat, first_id: u64) -> Result<Vec<Course>> {
    match format {
        InputFormat::Json => parse_json(content, first_id),
        InputFormat::Text | InputFormat::Auto => parse_text(content, first_id),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn spec_with_grade() {
        let course = parse_course_spec("Data Structures:3:A", CourseId(1)).unwrap();
        assert_eq!(course.name, "Data Structures");
        assert_eq!(course.credits, Credits::whole(3));
        assert_eq!(course.grade, Some(Grade::A));
        assert!(course.is_complete());
    }

    #[test]
    fn spec_with_marks_derives_grade() {
        let course = parse_course_spec("Calculus:4:82", CourseId(1)).unwrap();
        assert_eq!(course.grade, Some(Grade::APlus));
        assert_eq!(course.marks, Some(Marks::whole(82).unwrap()));
    }

    #[test]
    fn spec_name_may_contain_colons() {
        let course = parse_course_spec("CSE 101: Intro:1.5:B+", CourseId(1)).unwrap();
        assert_eq!(course.name, "CSE 101: Intro");
        assert_eq!(course.credits, Credits::from_hundredths(150));
        assert_eq!(course.grade, Some(Grade::BPlus));
    }

    #[test]
    fn spec_empty_fields_are_incomplete() {
        let course = parse_course_spec(":3:", CourseId(1)).unwrap();
        assert!(!course.is_complete());
        assert!(course.grade.is_none());
    }

    #[test]
    fn signed_marks_are_number_errors() {
        for field in ["-5", "+80"] {
            let err = parse_course_spec(&format!("Optics:3:{field}"), CourseId(1)).unwrap_err();
            assert!(err.starts_with("marks: invalid number"), "{err}");
        }
    }

    #[test]
    fn spec_errors() {
        assert!(parse_course_spec("just a name", CourseId(1)).is_err());
        assert!(parse_course_spec("X:three:A", CourseId(1)).is_err());
        assert!(parse_course_spec("X:3:Q", CourseId(1)).is_err());
        assert!(parse_course_spec("X:3:120", CourseId(1)).is_err());
    }

    #[test]
    fn text_skips_comments_and_reports_lines() {
        let content = "# header\n\nPhysics:3:A\nBad line\n";
        match parse_text(content, 1) {
            Err(CliError::Input { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected input error, got {other:?}"),
        }

        let ok = parse_text("# header\n\nPhysics:3:A\nChemistry:2:C\n", 10).unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[0].id, CourseId(10));
        assert_eq!(ok[1].id, CourseId(11));
    }

    #[test]
    fn json_grade_overrides_marks() {
        let content = r#"[
            {"name": "Physics", "credits": 3, "marks": 82, "grade": "C"},
            {"name": "Chemistry", "credits": 1.5, "marks": 71},
            {"name": "Draft"}
        ]"#;
        let courses = parse_json(content, 1).unwrap();
        assert_eq!(courses[0].grade, Some(Grade::C));
        assert_eq!(courses[1].grade, Some(Grade::AMinus));
        assert_eq!(courses[1].credits, Credits::from_hundredths(150));
        assert!(!courses[2].is_complete());
    }

    #[test]
    fn json_rejects_unknown_grade() {
        let content = r#"[{"name": "Physics", "credits": 3, "grade": "Z"}]"#;
        assert!(matches!(parse_json(content, 1), Err(CliError::Json(_))));
    }

    #[test]
    fn format_resolution() {
        use std::path::Path;
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("courses.JSON")),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("courses.txt")),
            InputFormat::Text
        );
        assert_eq!(
            InputFormat::Text.resolve(Path::new("courses.json")),
            InputFormat::Text
        );
    }
}

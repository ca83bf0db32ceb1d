//! # CLI Module
//!
//! Command definitions and their implementations.
//!
//! Each subcommand has a `cmd_*` function that writes to a caller-supplied
//! writer, so commands can be driven from tests without a process.

use crate::error::{CliError, Result};
use crate::input::{InputFormat, parse_course_spec, parse_courses};
use crate::interactive;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sgpa_core::{
    CalculationResult, Course, CourseId, Grade, GradePoint, Marks, SgpaEngine, SgpaError,
    WaiverOutcome,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "sgpa", version, about = "SGPA and tuition-waiver calculator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute SGPA and waiver for a set of courses.
    Calculate {
        #[arg(long, help = "Faculty id (see `sgpa faculties`)")]
        faculty: Option<String>,
        #[arg(
            long = "course",
            value_name = "NAME:CREDITS:GRADE_OR_MARKS",
            help = "A course; repeat for more"
        )]
        courses: Vec<String>,
        #[arg(long, value_name = "FILE", help = "Read courses from a file")]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        format: InputFormat,
    },
    /// Show the letter grade for a marks value.
    Grade { marks: String },
    /// Show the grade scale, or the points for one grade label.
    Scale { label: Option<String> },
    /// List faculty waiver policies.
    Faculties,
    /// Fill in courses interactively, then calculate.
    Worksheet {
        #[arg(long)]
        faculty: Option<String>,
    },
}

/// Envelope for JSON output.
#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

pub(crate) fn print_json<T: Serialize>(out: &mut impl Write, data: T) -> Result<()> {
    let text = serde_json::to_string_pretty(&JsonOut { ok: true, data })?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// JSON view of a calculation.
#[derive(Serialize)]
pub(crate) struct ResultJson<'a> {
    #[serde(flatten)]
    result: &'a CalculationResult,
    sgpa_display: String,
}

impl<'a> ResultJson<'a> {
    pub(crate) fn new(result: &'a CalculationResult) -> Self {
        Self {
            result,
            sgpa_display: result.sgpa.to_string(),
        }
    }
}

/// Log a finished calculation.
pub(crate) fn log_outcome(result: &CalculationResult) {
    match result.waiver_outcome() {
        WaiverOutcome::Eligible {
            percentage,
            faculty,
        } => info!(sgpa = %result.sgpa, percentage, faculty, "waiver eligible"),
        WaiverOutcome::NoWaiver { faculty } => {
            info!(sgpa = %result.sgpa, faculty, "no waiver tier met");
        }
        WaiverOutcome::NotSelected => info!(sgpa = %result.sgpa, "calculated without faculty"),
    }
}

/// Warn when a faculty selector does not name a policy.
pub(crate) fn warn_unknown_faculty(engine: &SgpaEngine, faculty: Option<&str>) {
    let unknown = faculty
        .map(str::trim)
        .filter(|f| !f.is_empty() && engine.policy(Some(*f)).is_none());
    if let Some(id) = unknown {
        warn!(faculty = id, "unknown faculty; no waiver will be applied");
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run a parsed command against stdin/stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Calculate {
            faculty,
            courses,
            input,
            format,
        } => {
            cmd_calculate(
                faculty.as_deref(),
                &courses,
                input.as_deref(),
                format,
                cli.json,
                &mut out,
            )?;
        }
        Commands::Grade { marks } => {
            cmd_grade(&marks, cli.json, &mut out)?;
        }
        Commands::Scale { label } => cmd_scale(label.as_deref(), cli.json, &mut out)?,
        Commands::Faculties => cmd_faculties(cli.json, &mut out)?,
        Commands::Worksheet { faculty } => {
            let stdin = io::stdin();
            interactive::cmd_worksheet(stdin.lock(), &mut out, faculty.as_deref(), cli.json)?;
        }
    }

    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Load courses from `--course` specs and an optional file.
pub fn load_courses(
    specs: &[String],
    input: Option<&Path>,
    format: InputFormat,
) -> Result<Vec<Course>> {
    let mut courses = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        let course = parse_course_spec(spec, CourseId(index as u64 + 1))
            .map_err(|message| CliError::input(index + 1, message))?;
        courses.push(course);
    }

    if let Some(path) = input {
        let content = std::fs::read_to_string(path)?;
        let format = format.resolve(path);
        debug!(path = %path.display(), ?format, "reading course file");
        let first_id = courses.len() as u64 + 1;
        courses.extend(parse_courses(&content, format, first_id)?);
    }

    Ok(courses)
}

/// `sgpa calculate`
pub fn cmd_calculate(
    faculty: Option<&str>,
    specs: &[String],
    input: Option<&Path>,
    format: InputFormat,
    json: bool,
    out: &mut impl Write,
) -> Result<CalculationResult> {
    let courses = load_courses(specs, input, format)?;
    let engine = SgpaEngine::standard();

    let skipped = courses.iter().filter(|c| !c.is_complete()).count();
    if skipped > 0 {
        warn!(skipped, "skipping incomplete courses");
    }
    warn_unknown_faculty(&engine, faculty);

    let result = engine.compute(&courses, faculty)?;
    log_outcome(&result);

    if json {
        print_json(out, ResultJson::new(&result))?;
    } else {
        write!(out, "{}", result.to_text())?;
    }

    Ok(result)
}

/// `sgpa grade`
pub fn cmd_grade(marks: &str, json: bool, out: &mut impl Write) -> Result<Grade> {
    let marks: Marks = marks.parse()?;
    let grade = Grade::from_marks(marks);

    if json {
        #[derive(Serialize)]
        struct GradeJson {
            marks: Marks,
            grade: Grade,
            points: GradePoint,
        }
        print_json(
            out,
            GradeJson {
                marks,
                grade,
                points: SgpaEngine::standard().scale().points(grade),
            },
        )?;
    } else {
        writeln!(out, "{marks} -> {grade}")?;
    }

    Ok(grade)
}

/// `sgpa scale`
pub fn cmd_scale(label: Option<&str>, json: bool, out: &mut impl Write) -> Result<()> {
    #[derive(Serialize)]
    struct ScaleEntry {
        grade: String,
        points: GradePoint,
    }

    let engine = SgpaEngine::standard();
    let scale = engine.scale();

    let entries: Vec<ScaleEntry> = match label {
        Some(label) => {
            if let Err(SgpaError::UnknownGrade(_)) = label.parse::<Grade>() {
                warn!(label, "grade not on the scale; it scores 0.00");
            }
            vec![ScaleEntry {
                grade: label.trim().to_string(),
                points: scale.points_for_label(label),
            }]
        }
        None => scale
            .entries()
            .map(|(grade, points)| ScaleEntry {
                grade: grade.to_string(),
                points,
            })
            .collect(),
    };

    if json {
        print_json(out, entries)?;
    } else {
        for entry in &entries {
            writeln!(out, "{:<3}\t{}", entry.grade, entry.points)?;
        }
    }

    Ok(())
}

/// `sgpa faculties`
pub fn cmd_faculties(json: bool, out: &mut impl Write) -> Result<()> {
    let policies = SgpaEngine::standard().policies();

    if json {
        print_json(out, policies)?;
        return Ok(());
    }

    for policy in policies {
        writeln!(out, "{}\t{}", policy.id, policy.name)?;
        for rule in policy.rules_descending() {
            writeln!(out, "  SGPA >= {}\t{}%", rule.min_sgpa, rule.percentage)?;
        }
    }

    Ok(())
}

//! # Interactive Worksheet
//!
//! A line-oriented version of the course form. Each line is one edit and
//! runs to completion before the next is read. Mistakes are reported and the
//! loop carries on; only I/O failures end it early.

use crate::cli::{ResultJson, log_outcome, print_json, warn_unknown_faculty};
use crate::error::{CliError, Result};
use sgpa_core::{CourseId, Credits, Grade, Marks, SgpaEngine, SgpaError, Worksheet};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const HELP: &str = "\
commands:
  add                 add a blank course
  name ID TEXT        set course name
  credits ID N        set credits
  marks ID N          set marks (0-100); the grade is derived
  grade ID G          select a grade (A+, A, A-, B+, B, B-, C+, C, D, F)
  delete ID           remove a course
  faculty [ID]        select a faculty, or clear it
  list                show courses
  calc                calculate SGPA and waiver
  help                show this text
  quit                leave";

/// One parsed worksheet command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add,
    Name(CourseId, String),
    Credits(CourseId, Credits),
    Marks(CourseId, Marks),
    Grade(CourseId, Grade),
    Delete(CourseId),
    Faculty(Option<String>),
    List,
    Calc,
    Help,
    Quit,
}

fn parse_id(word: Option<&str>) -> std::result::Result<CourseId, String> {
    let word = word.ok_or("missing course id")?;
    word.parse::<u64>()
        .map(CourseId)
        .map_err(|_| format!("invalid course id '{word}'"))
}

fn parse_value<T: FromStr<Err = SgpaError>>(word: &str) -> std::result::Result<T, String> {
    word.parse().map_err(|e: SgpaError| e.to_string())
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut words = rest.splitn(2, char::is_whitespace);
    let first = words.next().filter(|w| !w.is_empty());
    let tail = words.next().map(str::trim).unwrap_or("");

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => Command::Add,
        "name" => Command::Name(parse_id(first)?, tail.to_string()),
        "credits" => Command::Credits(parse_id(first)?, parse_value(tail)?),
        "marks" => Command::Marks(parse_id(first)?, parse_value(tail)?),
        "grade" => Command::Grade(parse_id(first)?, parse_value(tail)?),
        "delete" | "rm" => Command::Delete(parse_id(first)?),
        "faculty" => Command::Faculty(first.map(str::to_string)),
        "list" | "ls" => Command::List,
        "calc" | "calculate" => Command::Calc,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try `help`)")),
    };
    Ok(command)
}

fn write_rows(sheet: &Worksheet, out: &mut impl Write) -> Result<()> {
    writeln!(out, "id\tname\tcredits\tmarks\tgrade")?;
    for course in sheet.courses() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            course.id,
            if course.name.is_empty() { "-" } else { course.name.as_str() },
            course.credits,
            course.marks.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            course.grade.map(|g| g.to_string()).unwrap_or_else(|| "-".into()),
        )?;
    }
    match sheet.faculty() {
        Some(f) => writeln!(out, "faculty: {f}")?,
        None => writeln!(out, "faculty: (none)")?,
    }
    Ok(())
}

/// Run one command. Returns `false` when the session should end.
fn run_command(
    sheet: &mut Worksheet,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> Result<bool> {
    match command {
        Command::Add => {
            let id = sheet.add_course();
            writeln!(out, "added course {id}")?;
        }
        Command::Name(id, name) => sheet.set_name(id, name)?,
        Command::Credits(id, credits) => sheet.set_credits(id, credits)?,
        Command::Marks(id, marks) => {
            let grade = sheet.set_marks(id, marks)?;
            writeln!(out, "course {id}: grade set to {grade}")?;
        }
        Command::Grade(id, grade) => sheet.set_grade(id, grade)?,
        Command::Delete(id) => {
            sheet.delete_course(id)?;
        }
        Command::Faculty(faculty) => {
            sheet.select_faculty(faculty.as_deref());
            warn_unknown_faculty(&SgpaEngine::standard(), sheet.faculty());
        }
        Command::List => write_rows(sheet, out)?,
        Command::Calc => {
            let result = sheet.calculate()?;
            log_outcome(&result);
            if json {
                print_json(out, ResultJson::new(&result))?;
            } else {
                write!(out, "{}", result.to_text())?;
            }
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Apply one command, reporting worksheet errors and carrying on.
/// I/O and output errors end the session.
fn apply(
    sheet: &mut Worksheet,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> Result<bool> {
    match run_command(sheet, command, json, out) {
        Err(CliError::Core(e)) => {
            writeln!(out, "error: {e}")?;
            Ok(true)
        }
        other => other,
    }
}

/// `sgpa worksheet`: read commands until `quit` or end of input.
///
/// Returns the final worksheet state.
pub fn cmd_worksheet(
    input: impl BufRead,
    out: &mut impl Write,
    faculty: Option<&str>,
    json: bool,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.select_faculty(faculty);
    warn_unknown_faculty(&SgpaEngine::standard(), sheet.faculty());

    writeln!(out, "course 1 ready; type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(line = line.trim(), "worksheet command");

        match parse_command(&line) {
            Ok(command) => {
                if !apply(&mut sheet, command, json, out)? {
                    break;
                }
            }
            Err(message) => writeln!(out, "error: {message}")?,
        }
    }

    Ok(sheet)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("add"), Ok(Command::Add));
        assert_eq!(
            parse_command("name 2 Linear Algebra"),
            Ok(Command::Name(CourseId(2), "Linear Algebra".to_string()))
        );
        assert_eq!(
            parse_command("credits 1 1.5"),
            Ok(Command::Credits(CourseId(1), Credits::from_hundredths(150)))
        );
        assert_eq!(
            parse_command("GRADE 1 b+"),
            Ok(Command::Grade(CourseId(1), Grade::BPlus))
        );
        assert_eq!(parse_command("faculty"), Ok(Command::Faculty(None)));
        assert_eq!(
            parse_command("faculty humanities-social"),
            Ok(Command::Faculty(Some("humanities-social".to_string())))
        );
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn worksheet_errors_do_not_end_the_session() {
        let mut sheet = Worksheet::new();
        let mut out = Vec::new();
        assert!(apply(&mut sheet, Command::Delete(CourseId(1)), false, &mut out).unwrap());
        assert!(apply(&mut sheet, Command::Delete(CourseId(9)), false, &mut out).unwrap());
        assert!(apply(&mut sheet, Command::Calc, false, &mut out).unwrap());
        assert!(!apply(&mut sheet, Command::Quit, false, &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: cannot delete the only remaining course"));
        assert!(text.contains("error: course 9 not found"));
        assert!(text.contains("error: no complete course entries"));
    }

    #[test]
    fn marks_command_reports_derived_grade() {
        let mut sheet = Worksheet::new();
        let mut out = Vec::new();
        let marks = Marks::whole(82).unwrap();
        assert!(apply(&mut sheet, Command::Marks(CourseId(1), marks), false, &mut out).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "course 1: grade set to A+\n");
        assert_eq!(sheet.course(CourseId(1)).unwrap().grade, Some(Grade::APlus));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(parse_command("fly 1").is_err());
        assert!(parse_command("name").is_err());
        assert!(parse_command("name x Physics").is_err());
        assert!(parse_command("marks 1 150").is_err());
        assert!(parse_command("grade 1 Q").is_err());
    }
}

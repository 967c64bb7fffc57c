//! CSV import/export of a data directory
//!
//! A data directory holds three headerless files:
//!
//! | file              | columns                                         |
//! |-------------------|-------------------------------------------------|
//! | `students.csv`    | `regNo,fullName,email[,STATUS]`                 |
//! | `courses.csv`     | `code,title,credits,department,SEMESTER`        |
//! | `enrollments.csv` | `regNo,courseCode,GRADE,YYYY-MM-DD`             |
//!
//! Blank lines are skipped and a missing file reads as empty. Fields holding
//! a comma or a quote are written quoted with inner quotes doubled.

use crate::core::engine::EnrollmentEngine;
use crate::core::error::{DataError, EngineError};
use crate::core::models::{CourseConfig, Grade, Person, Semester, StudentStatus};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Student records file name
pub const STUDENTS_FILE: &str = "students.csv";
/// Course catalog file name
pub const COURSES_FILE: &str = "courses.csv";
/// Enrollment records file name
pub const ENROLLMENTS_FILE: &str = "enrollments.csv";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Counts of records applied and skipped by [`import_dir`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Students added
    pub students: usize,
    /// Courses added
    pub courses: usize,
    /// Enrollments restored
    pub enrollments: usize,
    /// Records skipped because their key already existed or their
    /// references were unknown
    pub skipped: usize,
}

/// Counts of records written by [`export_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Directory the files were written to
    pub dir: PathBuf,
    /// Student rows written
    pub students: usize,
    /// Course rows written
    pub courses: usize,
    /// Enrollment rows written
    pub enrollments: usize,
}

#[derive(Debug)]
struct StudentRow {
    reg_no: String,
    full_name: String,
    email: String,
    status: StudentStatus,
}

#[derive(Debug)]
struct CourseRow {
    code: String,
    title: String,
    credits: u32,
    department: String,
    semester: Semester,
}

#[derive(Debug)]
struct EnrollmentRow {
    reg_no: String,
    course_code: String,
    grade: Grade,
    date: NaiveDate,
}

/// Split one CSV line into trimmed fields
///
/// Understands double-quoted fields with `""` escapes.
///
/// # Errors
/// Returns a message if a quoted field is never closed
pub fn parse_csv_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current.trim().to_string());
    Ok(fields)
}

/// Quote a field if it holds a comma or quote
///
/// Records are one line each, so line breaks are folded into spaces.
#[must_use]
pub fn quote_field(field: &str) -> Cow<'_, str> {
    let field: Cow<'_, str> = if field.contains(['\n', '\r']) {
        Cow::Owned(
            field
                .split(['\n', '\r'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(field)
    };
    if field.contains([',', '"']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        field
    }
}

/// Join fields into one CSV line (no trailing newline)
#[must_use]
pub fn format_csv_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Read a file, treating a missing file as empty
fn read_optional(path: &Path) -> Result<String, DataError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            crate::debug!("{} not found, treating as empty", path.display());
            Ok(String::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Decode every non-blank line of `file` with `decode`, keeping line numbers
fn decode_file<T>(
    dir: &Path,
    file: &str,
    decode: impl Fn(&[String]) -> Result<T, String>,
) -> Result<Vec<(usize, T)>, DataError> {
    let content = read_optional(&dir.join(file))?;
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |message: String| DataError::Parse {
            file: file.to_string(),
            line: idx + 1,
            message,
        };
        let fields = parse_csv_line(line).map_err(parse_error)?;
        let row = decode(&fields).map_err(parse_error)?;
        rows.push((idx + 1, row));
    }

    Ok(rows)
}

fn expect_fields(fields: &[String], min: usize, max: usize) -> Result<(), String> {
    if fields.len() < min || fields.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min}-{max}")
        };
        return Err(format!("expected {expected} fields, found {}", fields.len()));
    }
    Ok(())
}

fn decode_student(fields: &[String]) -> Result<StudentRow, String> {
    expect_fields(fields, 3, 4)?;
    if fields[0].is_empty() {
        return Err("registration number is empty".to_string());
    }
    let status = match fields.get(3) {
        Some(s) if !s.is_empty() => s.parse()?,
        _ => StudentStatus::Active,
    };
    Ok(StudentRow {
        reg_no: fields[0].clone(),
        full_name: fields[1].clone(),
        email: fields[2].clone(),
        status,
    })
}

fn decode_course(fields: &[String]) -> Result<CourseRow, String> {
    expect_fields(fields, 5, 5)?;
    if fields[0].is_empty() {
        return Err("course code is empty".to_string());
    }
    let credits: u32 = fields[2]
        .parse()
        .map_err(|_| format!("invalid credits: {}", fields[2]))?;
    if credits == 0 {
        return Err(format!("course {} must carry a positive number of credits", fields[0]));
    }
    Ok(CourseRow {
        code: fields[0].clone(),
        title: fields[1].clone(),
        credits,
        department: fields[3].clone(),
        semester: fields[4].parse()?,
    })
}

fn decode_enrollment(fields: &[String]) -> Result<EnrollmentRow, String> {
    expect_fields(fields, 4, 4)?;
    let date = NaiveDate::parse_from_str(&fields[3], DATE_FORMAT)
        .map_err(|e| format!("invalid date {}: {e}", fields[3]))?;
    Ok(EnrollmentRow {
        reg_no: fields[0].clone(),
        course_code: fields[1].clone(),
        grade: fields[2].parse()?,
        date,
    })
}

/// Whether an engine rejection should skip the record instead of failing the import
const fn is_skippable(err: &EngineError) -> bool {
    matches!(
        err,
        EngineError::AlreadyExists { .. }
            | EngineError::DuplicateEnrollment { .. }
            | EngineError::NotFound { .. }
    )
}

/// Load `students.csv`, `courses.csv` and `enrollments.csv` from `dir`
///
/// All three files are decoded before anything is applied, so a malformed
/// line leaves the engine untouched. Records whose key already exists (or
/// enrollments naming an unknown student or course) are skipped with a
/// warning.
///
/// # Errors
/// `DataError::Parse` for a malformed line, `DataError::Io` for a read
/// failure other than a missing file
pub fn import_dir(engine: &EnrollmentEngine, dir: &Path) -> Result<ImportSummary, DataError> {
    let students = decode_file(dir, STUDENTS_FILE, decode_student)?;
    let courses = decode_file(dir, COURSES_FILE, decode_course)?;
    let enrollments = decode_file(dir, ENROLLMENTS_FILE, decode_enrollment)?;

    let mut summary = ImportSummary::default();
    let mut skip = |file: &str, line: usize, err: EngineError| -> Result<(), DataError> {
        if is_skippable(&err) {
            crate::warn!("{file}:{line}: skipped, {err}");
            summary.skipped += 1;
            Ok(())
        } else {
            Err(err.into())
        }
    };

    let mut added_students = 0;
    for (line, row) in students {
        let added = engine
            .add_student(&row.full_name, &row.email, &row.reg_no)
            .and_then(|_| match row.status {
                StudentStatus::Active => Ok(()),
                status => engine.set_student_status(&row.reg_no, status),
            });
        match added {
            Ok(()) => added_students += 1,
            Err(err) => skip(STUDENTS_FILE, line, err)?,
        }
    }

    let mut added_courses = 0;
    for (line, row) in courses {
        let mut config = CourseConfig::new(row.code, row.title, row.credits).semester(row.semester);
        if !row.department.is_empty() {
            config = config.department(row.department);
        }
        match engine.add_course(config) {
            Ok(_) => added_courses += 1,
            Err(err) => skip(COURSES_FILE, line, err)?,
        }
    }

    let mut added_enrollments = 0;
    for (line, row) in enrollments {
        match engine.restore_enrollment(&row.reg_no, &row.course_code, row.grade, row.date) {
            Ok(()) => added_enrollments += 1,
            Err(err) => skip(ENROLLMENTS_FILE, line, err)?,
        }
    }

    summary.students = added_students;
    summary.courses = added_courses;
    summary.enrollments = added_enrollments;
    crate::info!(
        "Imported {} students, {} courses, {} enrollments from {} ({} skipped)",
        summary.students,
        summary.courses,
        summary.enrollments,
        dir.display(),
        summary.skipped
    );
    Ok(summary)
}

/// Write every record of `engine` into `dir`, creating it if needed
///
/// Students and courses are sorted by natural key; enrollments follow their
/// student's order and keep enrollment order within a student.
///
/// # Errors
/// `DataError::Io` if the directory or a file cannot be written
pub fn export_dir(engine: &EnrollmentEngine, dir: &Path) -> Result<ExportSummary, DataError> {
    fs::create_dir_all(dir)?;

    let students = engine.students();
    let courses = engine.courses();

    let mut student_lines = String::new();
    let mut enrollment_lines = String::new();
    let mut enrollment_count = 0;
    for student in &students {
        let status = student.status.to_string();
        student_lines.push_str(&format_csv_line(&[
            student.reg_no(),
            student.full_name(),
            student.email(),
            &status,
        ]));
        student_lines.push('\n');

        for enrollment in student.enrollments() {
            let date = enrollment.enrollment_date().format(DATE_FORMAT).to_string();
            enrollment_lines.push_str(&format_csv_line(&[
                student.reg_no(),
                enrollment.course_code(),
                enrollment.grade().name(),
                &date,
            ]));
            enrollment_lines.push('\n');
            enrollment_count += 1;
        }
    }

    let mut course_lines = String::new();
    for course in &courses {
        let credits = course.credits().to_string();
        let semester = course.semester().to_string();
        course_lines.push_str(&format_csv_line(&[
            course.code(),
            &course.title,
            &credits,
            &course.department,
            &semester,
        ]));
        course_lines.push('\n');
    }

    fs::write(dir.join(STUDENTS_FILE), student_lines)?;
    fs::write(dir.join(COURSES_FILE), course_lines)?;
    fs::write(dir.join(ENROLLMENTS_FILE), enrollment_lines)?;

    crate::info!(
        "Exported {} students, {} courses, {} enrollments to {}",
        students.len(),
        courses.len(),
        enrollment_count,
        dir.display()
    );

    Ok(ExportSummary {
        dir: dir.to_path_buf(),
        students: students.len(),
        courses: courses.len(),
        enrollments: enrollment_count,
    })
}

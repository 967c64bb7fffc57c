//! Plain-text report rendering
//!
//! Transcripts go through the `transcript.txt` template; rankings and the
//! grade distribution are small fixed-width tables built in place.

use crate::core::engine::{RankedStudent, Transcript};
use crate::core::error::DataError;
use crate::core::models::Grade;
use askama::Template;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Template)]
#[template(path = "transcript.txt")]
struct TranscriptTemplate<'a> {
    transcript: &'a Transcript,
}

/// Render a transcript as a printable text block
///
/// # Errors
/// Returns `DataError::Render` if the template fails
pub fn render_transcript(transcript: &Transcript) -> Result<String, DataError> {
    Ok(TranscriptTemplate { transcript }.render()?)
}

/// Render a GPA ranking table, one row per student in the given order
#[must_use]
pub fn render_top_students(ranked: &[RankedStudent]) -> String {
    if ranked.is_empty() {
        return "No students on record.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{:<6}{:<12}{:<32}{:>6}", "Rank", "Reg No", "Name", "GPA");
    let _ = writeln!(output, "{}", "-".repeat(56));
    for (idx, student) in ranked.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:<6}{:<12}{:<32}{:>6.2}",
            idx + 1,
            student.reg_no,
            student.full_name,
            student.gpa
        );
    }
    output
}

/// Render enrollment counts per grade, listing every grade of the scale
#[must_use]
pub fn render_grade_distribution(distribution: &BTreeMap<Grade, usize>) -> String {
    let total: usize = distribution.values().sum();
    let mut output = String::new();

    let _ = writeln!(output, "{:<12}{:>7}  Share", "Grade", "Count");
    let _ = writeln!(output, "{}", "-".repeat(40));
    for grade in Grade::ALL {
        let count = distribution.get(&grade).copied().unwrap_or(0);
        let bar = if total == 0 { 0 } else { count * 20 / total };
        let _ = writeln!(output, "{grade:<12}{count:>7}  {}", "#".repeat(bar));
    }
    let _ = writeln!(output, "{}", "-".repeat(40));
    let _ = writeln!(output, "{:<12}{total:>7}", "Total");
    output
}

//! Error types for the record engine and its collaborators
//!
//! Every variant is a recoverable condition: callers decide how to present it.

use crate::core::models::{Grade, Semester};
use thiserror::Error;

/// Errors returned by the record store and the enrollment engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A referenced student, course, instructor or enrollment does not exist
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// Natural key used for the lookup
        key: String,
    },

    /// The student already holds an enrollment for the course
    #[error("student {reg_no} is already enrolled in course {course_code}")]
    DuplicateEnrollment {
        /// Registration number of the student
        reg_no: String,
        /// Course the student attempted to enroll in again
        course_code: String,
    },

    /// The enrollment would push the semester credit load over the ceiling
    #[error(
        "enrolling {reg_no} would reach {} credits in {semester}, exceeding the limit of {limit}",
        attempted_total(.current, .requested)
    )]
    CreditLimitExceeded {
        /// Registration number of the student
        reg_no: String,
        /// Semester bucket that was checked
        semester: Semester,
        /// Credits already held in the bucket
        current: u32,
        /// Credits of the requested course
        requested: u32,
        /// Configured per-semester ceiling
        limit: u32,
    },

    /// A record with the same natural key is already stored
    #[error("{entity} already exists: {key}")]
    AlreadyExists {
        /// Kind of record being created
        entity: &'static str,
        /// Conflicting natural key
        key: String,
    },

    /// Grade changes are disabled and the enrollment already carries a grade
    #[error("grade for {reg_no} in {course_code} is locked at {grade}")]
    GradeLocked {
        /// Registration number of the student
        reg_no: String,
        /// Course of the graded enrollment
        course_code: String,
        /// Grade already on record
        grade: Grade,
    },

    /// Input rejected before touching the store
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl EngineError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Create an already exists error
    pub fn already_exists(entity: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Credit total a rejected enrollment would have reached
#[allow(clippy::trivially_copy_pass_by_ref)]
const fn attempted_total(current: &u32, requested: &u32) -> u32 {
    current.saturating_add(*requested)
}

/// Errors raised by the file-facing collaborators (CSV codec, backup, reports)
#[derive(Debug, Error)]
pub enum DataError {
    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of a data file could not be decoded
    #[error("{file}:{line}: {message}")]
    Parse {
        /// File name the line came from
        file: String,
        /// One-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// The engine rejected a decoded record
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A report template failed to render
    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

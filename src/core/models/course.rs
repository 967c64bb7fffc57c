//! Course model

use super::PersonId;
use crate::core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Department assigned when none is given
pub const DEFAULT_DEPARTMENT: &str = "General";

/// Academic term a course runs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    /// Autumn term (default)
    #[default]
    Fall,
    /// Spring term
    Spring,
    /// Summer term
    Summer,
}

impl Semester {
    /// Every semester in calendar order of the academic year
    pub const ALL: [Self; 3] = [Self::Fall, Self::Spring, Self::Summer];
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FALL" => Ok(Self::Fall),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            _ => Err(format!("Unknown semester: {s} (expected FALL, SPRING, SUMMER)")),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fall => "FALL",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
        };
        f.pad(name)
    }
}

/// Settings for creating a course
///
/// `code`, `title` and `credits` are required. Optional fields fall back to
/// `semester = FALL`, `department = "General"` and no instructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseConfig {
    /// Course code (natural key, e.g., "CS101")
    pub code: String,
    /// Course title
    pub title: String,
    /// Credit weight (must be positive)
    pub credits: u32,
    /// Owning department
    pub department: Option<String>,
    /// Semester the course runs in
    pub semester: Option<Semester>,
    /// Assigned instructor
    pub instructor: Option<PersonId>,
}

impl CourseConfig {
    /// Config with the required fields and every optional field unset
    #[must_use]
    pub fn new(code: impl Into<String>, title: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
            ..Self::default()
        }
    }

    /// Set the department
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the semester
    #[must_use]
    pub const fn semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }

    /// Set the assigned instructor
    #[must_use]
    pub const fn instructor(mut self, instructor: PersonId) -> Self {
        self.instructor = Some(instructor);
        self
    }
}

/// A course offered by the institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    code: String,
    /// Course title
    pub title: String,
    credits: u32,
    /// Owning department
    pub department: String,
    semester: Semester,
    instructor: Option<PersonId>,
}

impl Course {
    /// Build a course from its configuration
    ///
    /// # Errors
    /// Returns `EngineError::Invalid` if the code is blank or credits are zero
    pub fn from_config(config: CourseConfig) -> Result<Self, EngineError> {
        let code = config.code.trim().to_string();
        if code.is_empty() {
            return Err(EngineError::invalid("course code must not be empty"));
        }
        if config.credits == 0 {
            return Err(EngineError::invalid(format!(
                "course {code} must carry a positive number of credits"
            )));
        }

        Ok(Self {
            code,
            title: config.title,
            credits: config.credits,
            department: config
                .department
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
            semester: config.semester.unwrap_or_default(),
            instructor: config.instructor,
        })
    }

    /// Course code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Credit weight
    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    /// Semester the course runs in
    #[must_use]
    pub const fn semester(&self) -> Semester {
        self.semester
    }

    /// Assigned instructor, if any
    #[must_use]
    pub const fn instructor(&self) -> Option<PersonId> {
        self.instructor
    }

    /// Assign or replace the instructor
    pub fn assign_instructor(&mut self, instructor: PersonId) {
        self.instructor = Some(instructor);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code: {:<10} | Title: {:<30} | Credits: {} | Dept: {:<25} | Semester: {}",
            self.code, self.title, self.credits, self.department, self.semester
        )
    }
}

//! Student model

use super::{Enrollment, Identity, Person};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    /// Currently studying
    Active,
    /// Deactivated by an administrator
    Inactive,
    /// Completed the program
    Graduated,
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "GRADUATED" => Ok(Self::Graduated),
            _ => Err(format!("Unknown student status: {s}")),
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Graduated => "GRADUATED",
        };
        f.pad(name)
    }
}

/// A registered student and the enrollments they own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    identity: Identity,
    reg_no: String,
    /// Lifecycle status
    pub status: StudentStatus,
    registration_date: NaiveDate,
    enrollments: Vec<Enrollment>,
}

impl Student {
    /// Create an active student registered today
    ///
    /// # Arguments
    /// * `full_name` - Display name
    /// * `email` - Contact email
    /// * `reg_no` - Registration number (natural key)
    #[must_use]
    pub fn new(full_name: String, email: String, reg_no: String) -> Self {
        Self {
            identity: Identity::new(full_name, email),
            reg_no,
            status: StudentStatus::Active,
            registration_date: Local::now().date_naive(),
            enrollments: Vec::new(),
        }
    }

    /// Registration number
    #[must_use]
    pub fn reg_no(&self) -> &str {
        &self.reg_no
    }

    /// Date the student was registered
    #[must_use]
    pub const fn registration_date(&self) -> NaiveDate {
        self.registration_date
    }

    /// Enrollments in the order they were made
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Find the enrollment for a course, if any
    #[must_use]
    pub fn enrollment_for(&self, course_code: &str) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.course_code() == course_code)
    }

    /// Whether the student holds an enrollment for a course
    #[must_use]
    pub fn is_enrolled_in(&self, course_code: &str) -> bool {
        self.enrollment_for(course_code).is_some()
    }

    /// Update name and email
    pub fn update_contact(&mut self, full_name: String, email: String) {
        self.identity.full_name = full_name;
        self.identity.email = email;
    }

    pub(crate) fn push_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    pub(crate) fn enrollment_for_mut(&mut self, course_code: &str) -> Option<&mut Enrollment> {
        self.enrollments
            .iter_mut()
            .find(|e| e.course_code() == course_code)
    }

    pub(crate) fn remove_enrollment(&mut self, course_code: &str) -> Option<Enrollment> {
        let idx = self
            .enrollments
            .iter()
            .position(|e| e.course_code() == course_code)?;
        Some(self.enrollments.remove(idx))
    }
}

impl Person for Student {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn profile_summary(&self) -> String {
        format!(
            "Student Profile | RegNo: {} | Name: {} | Status: {} | Enrolled Courses: {}",
            self.reg_no,
            self.identity.full_name,
            self.status,
            self.enrollments.len()
        )
    }
}

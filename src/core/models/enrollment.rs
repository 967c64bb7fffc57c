//! Enrollment model

use super::{Grade, PersonId};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Links one student to one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    student_id: PersonId,
    course_code: String,
    grade: Grade,
    enrollment_date: NaiveDate,
}

impl Enrollment {
    /// Create a fresh, ungraded enrollment dated today
    #[must_use]
    pub fn new(student_id: PersonId, course_code: String) -> Self {
        Self::restore(
            student_id,
            course_code,
            Grade::NotGraded,
            Local::now().date_naive(),
        )
    }

    /// Rebuild an enrollment from persisted fields
    #[must_use]
    pub const fn restore(
        student_id: PersonId,
        course_code: String,
        grade: Grade,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            student_id,
            course_code,
            grade,
            enrollment_date,
        }
    }

    /// Owning student's identity
    #[must_use]
    pub const fn student_id(&self) -> PersonId {
        self.student_id
    }

    /// Enrolled course code
    #[must_use]
    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    /// Current grade
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// Date the enrollment was created
    #[must_use]
    pub const fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    /// Composite index key (`studentId_courseCode`)
    #[must_use]
    pub fn key(&self) -> String {
        Self::index_key(self.student_id, &self.course_code)
    }

    /// Build the composite index key for a student and course
    #[must_use]
    pub fn index_key(student_id: PersonId, course_code: &str) -> String {
        format!("{student_id}_{course_code}")
    }

    pub(crate) fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
    }
}

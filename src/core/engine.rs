//! Enrollment & academic record engine
//!
//! Owns the [`RecordStore`] and applies the enrollment rules on top of it:
//!
//! 1. A student may hold at most one enrollment per course.
//! 2. The credits a student carries within one semester may not exceed the
//!    configured ceiling (18 by default).
//!
//! It also records grades and derives GPA, rankings and transcripts. GPA is
//! credit-weighted: each graded course contributes `points * credits`, and
//! the sum is divided by the graded credits. `NOT_GRADED` enrollments are
//! ignored.
//!
//! The store sits behind one `RwLock`. `enroll` holds the write lock from the
//! first check through the commit, so two concurrent enrollments for the same
//! student cannot both pass the credit check against stale totals.

use crate::core::error::EngineError;
use crate::core::models::{
    Course, CourseConfig, Enrollment, Grade, Instructor, Person, PersonId, Semester, Student,
    StudentStatus,
};
use crate::core::store::RecordStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default per-semester credit ceiling
pub const DEFAULT_MAX_CREDITS_PER_SEMESTER: u32 = 18;

/// Institution-level enrollment rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPolicy {
    /// Maximum credits a student may carry in one semester
    pub max_credits_per_semester: u32,
    /// Whether a recorded grade may be overwritten
    pub allow_grade_changes: bool,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            max_credits_per_semester: DEFAULT_MAX_CREDITS_PER_SEMESTER,
            allow_grade_changes: true,
        }
    }
}

/// A student's position in a GPA ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    /// Registration number
    pub reg_no: String,
    /// Full display name
    pub full_name: String,
    /// Credit-weighted GPA at full precision
    pub gpa: f64,
}

/// One course row of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    /// Course code
    pub course_code: String,
    /// Course title
    pub title: String,
    /// Credit weight
    pub credits: u32,
    /// Grade on record
    pub grade: Grade,
}

/// A student's academic record at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Registration number
    pub reg_no: String,
    /// Full display name
    pub full_name: String,
    /// Courses in enrollment order
    pub lines: Vec<TranscriptLine>,
    /// Cumulative credit-weighted GPA
    pub gpa: f64,
}

impl Transcript {
    /// Credits across every listed course
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.lines.iter().fold(0, |total, l| total.saturating_add(l.credits))
    }

    /// Credits of graded courses only
    #[must_use]
    pub fn graded_credits(&self) -> u32 {
        self.lines
            .iter()
            .filter(|l| l.grade.is_graded())
            .fold(0, |total, l| total.saturating_add(l.credits))
    }
}

/// Enrollment rules, grading and academic metrics over one record store
#[derive(Debug, Default)]
pub struct EnrollmentEngine {
    store: RwLock<RecordStore>,
    policy: EnrollmentPolicy,
}

impl EnrollmentEngine {
    /// Create an engine over an existing store
    #[must_use]
    pub fn new(store: RecordStore, policy: EnrollmentPolicy) -> Self {
        Self {
            store: RwLock::new(store),
            policy,
        }
    }

    /// Active enrollment policy
    #[must_use]
    pub const fn policy(&self) -> EnrollmentPolicy {
        self.policy
    }

    // Every mutation commits in a single step, so a poisoned lock never
    // guards a half-applied change.
    fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure against the store
    pub fn read_store<R>(&self, f: impl FnOnce(&RecordStore) -> R) -> R {
        f(&self.read())
    }

    /// Consume the engine and hand back its store
    #[must_use]
    pub fn into_store(self) -> RecordStore {
        self.store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // --- Students ---

    /// Register a new student
    ///
    /// # Errors
    /// `Invalid` for a blank registration number, `AlreadyExists` if taken
    pub fn add_student(
        &self,
        full_name: &str,
        email: &str,
        reg_no: &str,
    ) -> Result<Student, EngineError> {
        let reg_no = reg_no.trim();
        if reg_no.is_empty() {
            return Err(EngineError::invalid("registration number must not be empty"));
        }
        let student = Student::new(
            full_name.trim().to_string(),
            email.trim().to_string(),
            reg_no.to_string(),
        );
        self.write().upsert_student(student.clone())?;
        Ok(student)
    }

    /// Look up a student by registration number
    #[must_use]
    pub fn find_student(&self, reg_no: &str) -> Option<Student> {
        self.read().get_student(reg_no).cloned()
    }

    /// All students ordered by registration number
    #[must_use]
    pub fn students(&self) -> Vec<Student> {
        let mut students: Vec<Student> = self.read().all_students().into_iter().cloned().collect();
        students.sort_by(|a, b| a.reg_no().cmp(b.reg_no()));
        students
    }

    /// Replace a student's name and email
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn update_student(&self, reg_no: &str, full_name: &str, email: &str) -> Result<(), EngineError> {
        let mut store = self.write();
        let student = store
            .get_student_mut(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        student.update_contact(full_name.trim().to_string(), email.trim().to_string());
        Ok(())
    }

    /// Change a student's lifecycle status
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn set_student_status(&self, reg_no: &str, status: StudentStatus) -> Result<(), EngineError> {
        let mut store = self.write();
        let student = store
            .get_student_mut(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        student.status = status;
        Ok(())
    }

    /// Mark a student inactive
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn deactivate_student(&self, reg_no: &str) -> Result<(), EngineError> {
        self.set_student_status(reg_no, StudentStatus::Inactive)
    }

    // --- Courses ---

    /// Add a course to the catalog
    ///
    /// # Errors
    /// `Invalid` for a malformed config, `NotFound` for an unknown
    /// instructor, `AlreadyExists` if the code is taken
    pub fn add_course(&self, config: CourseConfig) -> Result<Course, EngineError> {
        let course = Course::from_config(config)?;
        let mut store = self.write();
        if let Some(id) = course.instructor() {
            if store.get_instructor(id).is_none() {
                return Err(EngineError::not_found("instructor", id.to_string()));
            }
        }
        store.upsert_course(course.clone())?;
        Ok(course)
    }

    /// Look up a course by code
    #[must_use]
    pub fn find_course(&self, code: &str) -> Option<Course> {
        self.read().get_course(code).cloned()
    }

    /// All courses ordered by code
    #[must_use]
    pub fn courses(&self) -> Vec<Course> {
        self.courses_where(|_| true)
    }

    /// Courses of a department (case-insensitive), ordered by code
    #[must_use]
    pub fn courses_by_department(&self, department: &str) -> Vec<Course> {
        self.courses_where(|c| c.department.eq_ignore_ascii_case(department))
    }

    /// Courses running in a semester, ordered by code
    #[must_use]
    pub fn courses_by_semester(&self, semester: Semester) -> Vec<Course> {
        self.courses_where(|c| c.semester() == semester)
    }

    /// Courses taught by an instructor, ordered by code
    #[must_use]
    pub fn courses_by_instructor(&self, instructor: PersonId) -> Vec<Course> {
        self.courses_where(|c| c.instructor() == Some(instructor))
    }

    fn courses_where(&self, pred: impl Fn(&Course) -> bool) -> Vec<Course> {
        let mut courses: Vec<Course> = self
            .read()
            .all_courses()
            .into_iter()
            .filter(|c| pred(c))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.code().cmp(b.code()));
        courses
    }

    // --- Instructors ---

    /// Hire an instructor
    ///
    /// # Errors
    /// `AlreadyExists` on an id collision
    pub fn add_instructor(
        &self,
        full_name: &str,
        email: &str,
        department: &str,
    ) -> Result<Instructor, EngineError> {
        let instructor = Instructor::new(
            full_name.trim().to_string(),
            email.trim().to_string(),
            department.trim().to_string(),
        );
        self.write().add_instructor(instructor.clone())?;
        Ok(instructor)
    }

    /// Look up an instructor by id
    #[must_use]
    pub fn find_instructor(&self, id: PersonId) -> Option<Instructor> {
        self.read().get_instructor(id).cloned()
    }

    /// All instructors ordered by name
    #[must_use]
    pub fn instructors(&self) -> Vec<Instructor> {
        let mut instructors: Vec<Instructor> =
            self.read().all_instructors().into_iter().cloned().collect();
        instructors.sort_by(|a, b| a.full_name().cmp(b.full_name()));
        instructors
    }

    /// Assign (or reassign) the instructor of a course
    ///
    /// # Errors
    /// `NotFound` if either the course or the instructor is unknown
    pub fn assign_instructor(&self, course_code: &str, instructor: PersonId) -> Result<(), EngineError> {
        let mut store = self.write();
        if store.get_instructor(instructor).is_none() {
            return Err(EngineError::not_found("instructor", instructor.to_string()));
        }
        let course = store
            .get_course_mut(course_code)
            .ok_or_else(|| EngineError::not_found("course", course_code))?;
        course.assign_instructor(instructor);
        Ok(())
    }

    // --- Enrollment ---

    /// Enroll a student in a course
    ///
    /// The duplicate check runs before the credit check. On any error the
    /// store is left untouched.
    ///
    /// # Errors
    /// - `NotFound` if the student or course does not exist
    /// - `DuplicateEnrollment` if the student already holds the course
    /// - `CreditLimitExceeded` if the semester bucket would pass the ceiling
    pub fn enroll(&self, reg_no: &str, course_code: &str) -> Result<Enrollment, EngineError> {
        let mut guard = self.write();
        let store = &mut *guard;

        let student = store
            .get_student(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        let course = store
            .get_course(course_code)
            .ok_or_else(|| EngineError::not_found("course", course_code))?;

        if student.is_enrolled_in(course_code) {
            return Err(EngineError::DuplicateEnrollment {
                reg_no: reg_no.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let semester = course.semester();
        let current = credits_in_semester(store, student, semester);
        let requested = course.credits();
        let limit = self.policy.max_credits_per_semester;
        if current.saturating_add(requested) > limit {
            return Err(EngineError::CreditLimitExceeded {
                reg_no: reg_no.to_string(),
                semester,
                current,
                requested,
                limit,
            });
        }

        let enrollment = Enrollment::new(student.id(), course.code().to_string());
        store.put_enrollment(reg_no, enrollment.clone())?;
        Ok(enrollment)
    }

    /// Withdraw a student from a course
    ///
    /// # Errors
    /// `NotFound` if the student or the enrollment does not exist
    pub fn withdraw(&self, reg_no: &str, course_code: &str) -> Result<Enrollment, EngineError> {
        let mut store = self.write();
        if store.get_student(reg_no).is_none() {
            return Err(EngineError::not_found("student", reg_no));
        }
        store
            .remove_enrollment(reg_no, course_code)
            .ok_or_else(|| EngineError::not_found("enrollment", format!("{reg_no}/{course_code}")))
    }

    /// Re-insert a persisted enrollment, keeping its grade and date
    ///
    /// The credit ceiling is not re-applied: the record was already accepted
    /// when it was first made.
    ///
    /// # Errors
    /// `NotFound` for an unknown student or course, `DuplicateEnrollment` if
    /// the student already holds the course
    pub fn restore_enrollment(
        &self,
        reg_no: &str,
        course_code: &str,
        grade: Grade,
        enrollment_date: NaiveDate,
    ) -> Result<(), EngineError> {
        let mut guard = self.write();
        let store = &mut *guard;

        let student = store
            .get_student(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        if store.get_course(course_code).is_none() {
            return Err(EngineError::not_found("course", course_code));
        }
        if student.is_enrolled_in(course_code) {
            return Err(EngineError::DuplicateEnrollment {
                reg_no: reg_no.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let enrollment =
            Enrollment::restore(student.id(), course_code.to_string(), grade, enrollment_date);
        store.put_enrollment(reg_no, enrollment)
    }

    /// Record a grade for an existing enrollment
    ///
    /// Grades may be overwritten unless the policy disables grade changes.
    ///
    /// # Errors
    /// - `NotFound` if the student or enrollment does not exist
    /// - `GradeLocked` if changes are disabled and a different grade is on record
    pub fn record_grade(&self, reg_no: &str, course_code: &str, grade: Grade) -> Result<(), EngineError> {
        let mut store = self.write();
        let student = store
            .get_student_mut(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        let enrollment = student
            .enrollment_for_mut(course_code)
            .ok_or_else(|| EngineError::not_found("enrollment", format!("{reg_no}/{course_code}")))?;

        let current = enrollment.grade();
        if !self.policy.allow_grade_changes && current.is_graded() && current != grade {
            return Err(EngineError::GradeLocked {
                reg_no: reg_no.to_string(),
                course_code: course_code.to_string(),
                grade: current,
            });
        }

        enrollment.set_grade(grade);
        Ok(())
    }

    // --- Metrics ---

    /// Credits a student currently carries in one semester
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn semester_credits(&self, reg_no: &str, semester: Semester) -> Result<u32, EngineError> {
        let store = self.read();
        let student = store
            .get_student(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        Ok(credits_in_semester(&store, student, semester))
    }

    /// Credit-weighted GPA of a student (0.0 when nothing is graded)
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn calculate_gpa(&self, reg_no: &str) -> Result<f64, EngineError> {
        let store = self.read();
        let student = store
            .get_student(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        Ok(weighted_gpa(&store, student))
    }

    /// The `n` highest-GPA students
    ///
    /// Ordered by GPA descending at full precision; equal GPAs are ordered by
    /// registration number ascending.
    #[must_use]
    pub fn top_students(&self, n: usize) -> Vec<RankedStudent> {
        let store = self.read();
        let mut ranked: Vec<RankedStudent> = store
            .all_students()
            .into_iter()
            .map(|s| RankedStudent {
                reg_no: s.reg_no().to_string(),
                full_name: s.full_name().to_string(),
                gpa: weighted_gpa(&store, s),
            })
            .collect();

        ranked.sort_by(|a, b| b.gpa.total_cmp(&a.gpa).then_with(|| a.reg_no.cmp(&b.reg_no)));
        ranked.truncate(n);
        ranked
    }

    /// Build a student's transcript
    ///
    /// # Errors
    /// `NotFound` if the student does not exist
    pub fn generate_transcript(&self, reg_no: &str) -> Result<Transcript, EngineError> {
        let store = self.read();
        let student = store
            .get_student(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;

        let lines = student
            .enrollments()
            .iter()
            .filter_map(|e| {
                let course = store.get_course(e.course_code())?;
                Some(TranscriptLine {
                    course_code: course.code().to_string(),
                    title: course.title.clone(),
                    credits: course.credits(),
                    grade: e.grade(),
                })
            })
            .collect();

        Ok(Transcript {
            reg_no: student.reg_no().to_string(),
            full_name: student.full_name().to_string(),
            lines,
            gpa: weighted_gpa(&store, student),
        })
    }

    /// Number of enrollments holding each grade, in scale order
    #[must_use]
    pub fn grade_distribution(&self) -> BTreeMap<Grade, usize> {
        let store = self.read();
        let mut distribution = BTreeMap::new();
        for student in store.all_students() {
            for enrollment in student.enrollments() {
                *distribution.entry(enrollment.grade()).or_insert(0) += 1;
            }
        }
        distribution
    }
}

/// Sum the credits of a student's enrollments whose course runs in `semester`
///
/// Saturates at `u32::MAX`; restored enrollments bypass the ceiling.
fn credits_in_semester(store: &RecordStore, student: &Student, semester: Semester) -> u32 {
    student
        .enrollments()
        .iter()
        .filter_map(|e| store.get_course(e.course_code()))
        .filter(|c| c.semester() == semester)
        .map(Course::credits)
        .fold(0, u32::saturating_add)
}

/// Credit-weighted GPA over graded enrollments
fn weighted_gpa(store: &RecordStore, student: &Student) -> f64 {
    let (points, credits) = student
        .enrollments()
        .iter()
        .filter_map(|e| {
            let points = e.grade().points()?;
            let course = store.get_course(e.course_code())?;
            Some((points, f64::from(course.credits())))
        })
        .fold((0.0_f64, 0.0_f64), |(total_points, total_credits), (points, credits)| {
            (total_points + points * credits, total_credits + credits)
        });

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

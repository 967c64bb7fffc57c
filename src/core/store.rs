//! In-memory record store
//!
//! Keyed storage for students (by registration number), courses (by code),
//! instructors (by id) and an enrollment index (by `studentId_courseCode`).
//! Enrollments themselves live inside the owning [`Student`]; the index maps
//! the composite key back to that student. Nothing here checks enrollment
//! rules, that is the engine's job.

use crate::core::error::EngineError;
use crate::core::models::{Course, Enrollment, Instructor, Person, PersonId, Student};
use std::collections::HashMap;

/// Keyed collections of every record in the system
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Students indexed by registration number
    students: HashMap<String, Student>,

    /// Courses indexed by course code
    courses: HashMap<String, Course>,

    /// Instructors indexed by person id
    instructors: HashMap<PersonId, Instructor>,

    /// Composite enrollment key -> owning student's registration number
    enrollment_index: HashMap<String, String>,
}

impl RecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a student
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the registration number is taken
    pub fn upsert_student(&mut self, student: Student) -> Result<(), EngineError> {
        if self.students.contains_key(student.reg_no()) {
            return Err(EngineError::already_exists("student", student.reg_no()));
        }
        for enrollment in student.enrollments() {
            self.enrollment_index
                .insert(enrollment.key(), student.reg_no().to_string());
        }
        self.students.insert(student.reg_no().to_string(), student);
        Ok(())
    }

    /// Add a course
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the course code is taken
    pub fn upsert_course(&mut self, course: Course) -> Result<(), EngineError> {
        if self.courses.contains_key(course.code()) {
            return Err(EngineError::already_exists("course", course.code()));
        }
        self.courses.insert(course.code().to_string(), course);
        Ok(())
    }

    /// Add an instructor
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the id is already stored
    pub fn add_instructor(&mut self, instructor: Instructor) -> Result<(), EngineError> {
        let id = instructor.id();
        if self.instructors.contains_key(&id) {
            return Err(EngineError::already_exists("instructor", id.to_string()));
        }
        self.instructors.insert(id, instructor);
        Ok(())
    }

    /// Get a student by registration number
    #[must_use]
    pub fn get_student(&self, reg_no: &str) -> Option<&Student> {
        self.students.get(reg_no)
    }

    /// Get a mutable student by registration number
    pub fn get_student_mut(&mut self, reg_no: &str) -> Option<&mut Student> {
        self.students.get_mut(reg_no)
    }

    /// Get a course by code
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Get a mutable course by code
    pub fn get_course_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.get_mut(code)
    }

    /// Get an instructor by id
    #[must_use]
    pub fn get_instructor(&self, id: PersonId) -> Option<&Instructor> {
        self.instructors.get(&id)
    }

    /// All students, in no particular order
    #[must_use]
    pub fn all_students(&self) -> Vec<&Student> {
        self.students.values().collect()
    }

    /// All courses, in no particular order
    #[must_use]
    pub fn all_courses(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// All instructors, in no particular order
    #[must_use]
    pub fn all_instructors(&self) -> Vec<&Instructor> {
        self.instructors.values().collect()
    }

    /// Append an enrollment to its student's list and index it
    ///
    /// # Errors
    /// Returns `NotFound` if the student is missing, `AlreadyExists` if the
    /// composite key is already indexed, or `Invalid` if the enrollment names
    /// a different student id
    pub fn put_enrollment(&mut self, reg_no: &str, enrollment: Enrollment) -> Result<(), EngineError> {
        let key = enrollment.key();
        if self.enrollment_index.contains_key(&key) {
            return Err(EngineError::already_exists("enrollment", key));
        }
        let student = self
            .students
            .get_mut(reg_no)
            .ok_or_else(|| EngineError::not_found("student", reg_no))?;
        if student.id() != enrollment.student_id() {
            return Err(EngineError::invalid(format!(
                "enrollment for {} does not belong to student {reg_no}",
                enrollment.course_code()
            )));
        }

        student.push_enrollment(enrollment);
        self.enrollment_index.insert(key, reg_no.to_string());
        Ok(())
    }

    /// Look up an enrollment by its owner's id and course code
    #[must_use]
    pub fn get_enrollment(&self, student_id: PersonId, course_code: &str) -> Option<&Enrollment> {
        let reg_no = self
            .enrollment_index
            .get(&Enrollment::index_key(student_id, course_code))?;
        self.students.get(reg_no)?.enrollment_for(course_code)
    }

    /// Remove an enrollment from its student's list and the index
    pub fn remove_enrollment(&mut self, reg_no: &str, course_code: &str) -> Option<Enrollment> {
        let removed = self.students.get_mut(reg_no)?.remove_enrollment(course_code)?;
        self.enrollment_index.remove(&removed.key());
        Some(removed)
    }

    /// Number of indexed enrollments
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.enrollment_index.len()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.students.clear();
        self.courses.clear();
        self.instructors.clear();
        self.enrollment_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseConfig;

    fn student(reg_no: &str) -> Student {
        Student::new(
            format!("Student {reg_no}"),
            format!("{reg_no}@example.edu"),
            reg_no.to_string(),
        )
    }

    fn course(code: &str, credits: u32) -> Course {
        Course::from_config(CourseConfig::new(code, format!("Course {code}"), credits))
            .expect("valid course")
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let mut store = RecordStore::new();
        store.upsert_student(student("S1")).expect("first insert");

        let err = store.upsert_student(student("S1")).unwrap_err();
        assert_eq!(err, EngineError::already_exists("student", "S1"));
        assert_eq!(store.all_students().len(), 1);
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let mut store = RecordStore::new();
        store.upsert_course(course("CS101", 4)).expect("first insert");

        assert!(matches!(
            store.upsert_course(course("CS101", 3)),
            Err(EngineError::AlreadyExists { .. })
        ));
        assert_eq!(store.get_course("CS101").map(Course::credits), Some(4));
    }

    #[test]
    fn test_put_and_get_enrollment() {
        let mut store = RecordStore::new();
        let s = student("S1");
        let id = s.id();
        store.upsert_student(s).expect("insert student");

        store
            .put_enrollment("S1", Enrollment::new(id, "CS101".to_string()))
            .expect("put enrollment");

        let found = store.get_enrollment(id, "CS101").expect("indexed");
        assert_eq!(found.course_code(), "CS101");
        assert_eq!(store.enrollment_count(), 1);
        assert_eq!(
            store.get_student("S1").map(|s| s.enrollments().len()),
            Some(1)
        );
        assert!(store.get_enrollment(id, "MA101").is_none());
    }

    #[test]
    fn test_put_enrollment_twice_rejected() {
        let mut store = RecordStore::new();
        let s = student("S1");
        let id = s.id();
        store.upsert_student(s).expect("insert student");
        store
            .put_enrollment("S1", Enrollment::new(id, "CS101".to_string()))
            .expect("put enrollment");

        let err = store
            .put_enrollment("S1", Enrollment::new(id, "CS101".to_string()))
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyExists { .. }));
        assert_eq!(store.enrollment_count(), 1);
    }

    #[test]
    fn test_put_enrollment_unknown_student() {
        let mut store = RecordStore::new();
        let err = store
            .put_enrollment("S404", Enrollment::new(PersonId::new(), "CS101".to_string()))
            .unwrap_err();
        assert_eq!(err, EngineError::not_found("student", "S404"));
        assert_eq!(store.enrollment_count(), 0);
    }

    #[test]
    fn test_remove_enrollment_updates_index() {
        let mut store = RecordStore::new();
        let s = student("S1");
        let id = s.id();
        store.upsert_student(s).expect("insert student");
        store
            .put_enrollment("S1", Enrollment::new(id, "CS101".to_string()))
            .expect("put enrollment");

        let removed = store.remove_enrollment("S1", "CS101");
        assert!(removed.is_some());
        assert!(store.get_enrollment(id, "CS101").is_none());
        assert_eq!(store.enrollment_count(), 0);
        assert!(store.remove_enrollment("S1", "CS101").is_none());
    }

    #[test]
    fn test_instructors_keyed_by_id() {
        let mut store = RecordStore::new();
        let instructor = Instructor::new(
            "Barbara Liskov".to_string(),
            "liskov@example.edu".to_string(),
            "Computer Science".to_string(),
        );
        let id = instructor.id();
        store.add_instructor(instructor.clone()).expect("insert");

        assert_eq!(store.get_instructor(id).map(|i| i.full_name()), Some("Barbara Liskov"));
        assert!(store.add_instructor(instructor).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = RecordStore::new();
        store.upsert_student(student("S1")).expect("insert student");
        store.upsert_course(course("CS101", 4)).expect("insert course");
        store.clear();

        assert!(store.all_students().is_empty());
        assert!(store.all_courses().is_empty());
        assert_eq!(store.enrollment_count(), 0);
    }
}

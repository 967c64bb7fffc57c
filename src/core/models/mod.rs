//! Data models for `CCRM`

pub mod course;
pub mod enrollment;
pub mod grade;
pub mod instructor;
pub mod person;
pub mod student;

pub use course::{Course, CourseConfig, Semester};
pub use enrollment::Enrollment;
pub use grade::Grade;
pub use instructor::Instructor;
pub use person::{Identity, Person, PersonId};
pub use student::{Student, StudentStatus};

//! Enrollment, grading and GPA command handlers

use super::{fail, open_engine, persist};
use ccrm::config::Config;
use ccrm::models::Grade;

/// Enroll a student in a course
pub fn enroll(config: &Config, reg_no: &str, course_code: &str) {
    let engine = open_engine(config);
    match engine.enroll(reg_no, course_code) {
        Ok(enrollment) => {
            persist(&engine, config);
            ccrm::info!("Enrolled {reg_no} in {course_code}");
            println!(
                "✓ Enrolled {reg_no} in {} on {}",
                enrollment.course_code(),
                enrollment.enrollment_date()
            );
        }
        Err(e) => fail(e),
    }
}

/// Withdraw a student from a course
pub fn withdraw(config: &Config, reg_no: &str, course_code: &str) {
    let engine = open_engine(config);
    match engine.withdraw(reg_no, course_code) {
        Ok(_) => {
            persist(&engine, config);
            ccrm::info!("Withdrew {reg_no} from {course_code}");
            println!("✓ Withdrew {reg_no} from {course_code}");
        }
        Err(e) => fail(e),
    }
}

/// Record a grade for an existing enrollment
pub fn grade(config: &Config, reg_no: &str, course_code: &str, grade: Grade) {
    let engine = open_engine(config);
    match engine.record_grade(reg_no, course_code, grade) {
        Ok(()) => {
            persist(&engine, config);
            ccrm::info!("Recorded {grade} for {reg_no} in {course_code}");
            println!("✓ Recorded grade {grade} for {reg_no} in {course_code}");
        }
        Err(e) => fail(e),
    }
}

/// Print a student's GPA
pub fn gpa(config: &Config, reg_no: &str) {
    let engine = open_engine(config);
    match engine.calculate_gpa(reg_no) {
        Ok(gpa) => println!("GPA for {reg_no}: {gpa:.2}"),
        Err(e) => fail(e),
    }
}

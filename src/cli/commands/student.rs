//! Student command handlers

use super::{fail, open_engine, persist};
use crate::args::StudentSubcommand;
use ccrm::config::Config;
use ccrm::core::report::render_transcript;
use ccrm::models::Person;
use ccrm::EnrollmentEngine;

/// Dispatch student subcommands
pub fn run(subcommand: StudentSubcommand, config: &Config) {
    let engine = open_engine(config);
    match subcommand {
        StudentSubcommand::Add {
            reg_no,
            name,
            email,
        } => add(&engine, config, &reg_no, &name, &email),
        StudentSubcommand::List => list(&engine),
        StudentSubcommand::Show { reg_no } => show(&engine, &reg_no),
        StudentSubcommand::Update {
            reg_no,
            name,
            email,
        } => update(&engine, config, &reg_no, name, email),
        StudentSubcommand::Deactivate { reg_no } => {
            if let Err(e) = engine.deactivate_student(&reg_no) {
                fail(e);
            }
            persist(&engine, config);
            println!("✓ Student {reg_no} deactivated");
        }
        StudentSubcommand::Transcript { reg_no } => transcript(&engine, &reg_no),
    }
}

fn add(engine: &EnrollmentEngine, config: &Config, reg_no: &str, name: &str, email: &str) {
    match engine.add_student(name, email, reg_no) {
        Ok(student) => {
            persist(engine, config);
            ccrm::info!("Added student {}", student.reg_no());
            println!("✓ {}", student.profile_summary());
        }
        Err(e) => fail(e),
    }
}

fn list(engine: &EnrollmentEngine) {
    let students = engine.students();
    if students.is_empty() {
        println!("No students on record.");
        return;
    }
    for student in &students {
        println!("{}", student.profile_summary());
    }
    ccrm::verbose!("{} students", students.len());
}

fn show(engine: &EnrollmentEngine, reg_no: &str) {
    let Some(student) = engine.find_student(reg_no) else {
        fail(format!("student not found: {reg_no}"));
    };

    println!("{}", student.profile_summary());
    println!("  Email:      {}", student.email());
    println!("  Registered: {}", student.registration_date());
    println!("  Id:         {}", student.id());

    if student.enrollments().is_empty() {
        println!("  No enrollments.");
        return;
    }
    println!("  Enrollments:");
    for enrollment in student.enrollments() {
        let title = engine
            .find_course(enrollment.course_code())
            .map(|c| c.title)
            .unwrap_or_default();
        println!(
            "    {:<10} {:<30} {:<10} {}",
            enrollment.course_code(),
            title,
            enrollment.grade(),
            enrollment.enrollment_date()
        );
    }
}

fn update(
    engine: &EnrollmentEngine,
    config: &Config,
    reg_no: &str,
    name: Option<String>,
    email: Option<String>,
) {
    let Some(student) = engine.find_student(reg_no) else {
        fail(format!("student not found: {reg_no}"));
    };
    if name.is_none() && email.is_none() {
        fail("Nothing to update: pass --name and/or --email");
    }

    let name = name.unwrap_or_else(|| student.full_name().to_string());
    let email = email.unwrap_or_else(|| student.email().to_string());
    if let Err(e) = engine.update_student(reg_no, &name, &email) {
        fail(e);
    }
    persist(engine, config);
    println!("✓ Student {reg_no} updated");
}

fn transcript(engine: &EnrollmentEngine, reg_no: &str) {
    let rendered = engine
        .generate_transcript(reg_no)
        .map_err(ccrm::DataError::from)
        .and_then(|t| render_transcript(&t));
    match rendered {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => fail(e),
    }
}

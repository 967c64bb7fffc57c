//! Course command handlers

use super::{fail, open_engine, persist};
use crate::args::CourseSubcommand;
use ccrm::config::Config;
use ccrm::models::{Course, CourseConfig};

/// Dispatch course subcommands
pub fn run(subcommand: CourseSubcommand, config: &Config) {
    let engine = open_engine(config);
    match subcommand {
        CourseSubcommand::Add {
            code,
            title,
            credits,
            department,
            semester,
        } => {
            let mut course_config = CourseConfig::new(code, title, credits);
            course_config.department = department;
            course_config.semester = semester;

            match engine.add_course(course_config) {
                Ok(course) => {
                    persist(&engine, config);
                    ccrm::info!("Added course {}", course.code());
                    println!("✓ {course}");
                }
                Err(e) => fail(e),
            }
        }
        CourseSubcommand::List {
            department,
            semester,
        } => {
            let mut courses = match &department {
                Some(dept) => engine.courses_by_department(dept),
                None => engine.courses(),
            };
            if let Some(semester) = semester {
                courses.retain(|c| c.semester() == semester);
            }
            print_courses(&courses);
        }
    }
}

fn print_courses(courses: &[Course]) {
    if courses.is_empty() {
        println!("No courses found.");
        return;
    }
    for course in courses {
        println!("{course}");
    }
    ccrm::verbose!("{} courses", courses.len());
}

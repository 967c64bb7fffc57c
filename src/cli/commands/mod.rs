//! CLI command handlers for `CCRM`.
//!
//! Each record command loads the data directory into a fresh engine, runs,
//! and writes the directory back if it changed anything.

pub mod config;
pub mod course;
pub mod data;
pub mod enrollment;
pub mod report;
pub mod student;

use ccrm::config::Config;
use ccrm::core::io::{export_dir, import_dir};
use ccrm::{EnrollmentEngine, RecordStore};
use std::fmt::Display;

/// Print an error with the failure marker and exit non-zero
pub fn fail(message: impl Display) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Build an engine from the configured data directory
pub fn open_engine(config: &Config) -> EnrollmentEngine {
    let engine = EnrollmentEngine::new(RecordStore::new(), config.enrollment_policy());
    let data_dir = config.data_dir();
    match import_dir(&engine, &data_dir) {
        Ok(summary) => {
            ccrm::debug!(
                "Loaded {} students, {} courses, {} enrollments from {}",
                summary.students,
                summary.courses,
                summary.enrollments,
                data_dir.display()
            );
            engine
        }
        Err(e) => fail(format!("Failed to load data from {}: {e}", data_dir.display())),
    }
}

/// Write the engine's records back to the configured data directory
pub fn persist(engine: &EnrollmentEngine, config: &Config) {
    let data_dir = config.data_dir();
    if let Err(e) = export_dir(engine, &data_dir) {
        fail(format!("Failed to save data to {}: {e}", data_dir.display()));
    }
}

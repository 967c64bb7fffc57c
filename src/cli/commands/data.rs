//! Data directory command handlers

use super::{fail, open_engine, persist};
use crate::args::DataSubcommand;
use ccrm::config::Config;
use ccrm::core::io::{create_backup, export_dir, import_dir};

/// Dispatch data subcommands
pub fn run(subcommand: DataSubcommand, config: &Config) {
    match subcommand {
        DataSubcommand::Import { dir } => {
            let engine = open_engine(config);
            match import_dir(&engine, &dir) {
                Ok(summary) => {
                    persist(&engine, config);
                    println!(
                        "✓ Imported {} students, {} courses, {} enrollments from {}",
                        summary.students,
                        summary.courses,
                        summary.enrollments,
                        dir.display()
                    );
                    if summary.skipped > 0 {
                        println!("  {} records skipped (see warnings)", summary.skipped);
                    }
                }
                Err(e) => fail(e),
            }
        }
        DataSubcommand::Export { dir } => {
            let engine = open_engine(config);
            match export_dir(&engine, &dir) {
                Ok(summary) => println!(
                    "✓ Exported {} students, {} courses, {} enrollments to {}",
                    summary.students,
                    summary.courses,
                    summary.enrollments,
                    summary.dir.display()
                ),
                Err(e) => fail(e),
            }
        }
        DataSubcommand::Backup => match create_backup(&config.data_dir(), &config.backups_dir()) {
            Ok(summary) => {
                println!("✓ Backup created at: {}", summary.path.display());
                println!(
                    "  {} files, {} bytes ({} KB)",
                    summary.files,
                    summary.bytes,
                    summary.kilobytes()
                );
            }
            Err(e) => fail(e),
        },
    }
}

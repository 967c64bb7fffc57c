//! Report command handlers

use super::open_engine;
use crate::args::ReportSubcommand;
use ccrm::config::Config;
use ccrm::core::report::{render_grade_distribution, render_top_students};

/// Dispatch report subcommands
pub fn run(subcommand: &ReportSubcommand, config: &Config) {
    let engine = open_engine(config);
    let text = match subcommand {
        ReportSubcommand::Top { count } => {
            println!("\n=== Top {count} Students by GPA ===\n");
            render_top_students(&engine.top_students(*count))
        }
        ReportSubcommand::Grades => {
            println!("\n=== Grade Distribution ===\n");
            render_grade_distribution(&engine.grade_distribution())
        }
    };
    print!("{text}");
}

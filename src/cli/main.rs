//! Command-line interface entry point for `CCRM`

mod args;
mod commands;

use args::{Cli, Command};
use ccrm::config::Config;
use ccrm::info;
use ccrm::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;

fn main() {
    let args = Cli::parse();

    // Stored config stays untouched for `config` subcommands; overrides only
    // apply to this run.
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path =
        (!config.logging.file.is_empty()).then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    ccrm::debug!(
        "ccrm {} using data dir {}",
        ccrm::core::get_version(),
        config.paths.data_dir
    );

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Student { subcommand } => commands::student::run(subcommand, &config),
        Command::Course { subcommand } => commands::course::run(subcommand, &config),
        Command::Enroll {
            reg_no,
            course_code,
        } => commands::enrollment::enroll(&config, &reg_no, &course_code),
        Command::Withdraw {
            reg_no,
            course_code,
        } => commands::enrollment::withdraw(&config, &reg_no, &course_code),
        Command::Grade {
            reg_no,
            course_code,
            grade,
        } => commands::enrollment::grade(&config, &reg_no, &course_code, grade),
        Command::Gpa { reg_no } => commands::enrollment::gpa(&config, &reg_no),
        Command::Report { subcommand } => commands::report::run(&subcommand, &config),
        Command::Data { subcommand } => commands::data::run(subcommand, &config),
    }
}

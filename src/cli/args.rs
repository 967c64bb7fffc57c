//! CLI argument definitions for `CCRM`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ccrm::config::ConfigOverrides;
use ccrm::logger::Level;
use ccrm::models::{Grade, Semester};

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&Level::from(*self), f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_credits`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum StudentSubcommand {
    /// Register a new student.
    Add {
        /// Registration number (unique)
        #[arg(value_name = "REGNO")]
        reg_no: String,
        /// Full name
        #[arg(long)]
        name: String,
        /// Contact email
        #[arg(long)]
        email: String,
    },
    /// List all students.
    List,
    /// Show a student's profile and enrollments.
    Show {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
    },
    /// Update a student's name and/or email.
    Update {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
        /// New full name
        #[arg(long)]
        name: Option<String>,
        /// New contact email
        #[arg(long)]
        email: Option<String>,
    },
    /// Mark a student inactive.
    Deactivate {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
    },
    /// Print a student's transcript.
    Transcript {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Add a course to the catalog.
    Add {
        /// Course code (unique, e.g., CS101)
        #[arg(value_name = "CODE")]
        code: String,
        /// Course title
        #[arg(long)]
        title: String,
        /// Credit weight
        #[arg(long)]
        credits: u32,
        /// Owning department (default: General)
        #[arg(long)]
        department: Option<String>,
        /// Semester: FALL, SPRING or SUMMER (default: FALL)
        #[arg(long)]
        semester: Option<Semester>,
    },
    /// List courses, optionally filtered.
    List {
        /// Only courses of this department (case-insensitive)
        #[arg(long)]
        department: Option<String>,
        /// Only courses running in this semester
        #[arg(long)]
        semester: Option<Semester>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportSubcommand {
    /// Rank students by GPA.
    Top {
        /// Number of students to show
        #[arg(short = 'n', long = "count", default_value_t = 3)]
        count: usize,
    },
    /// Count enrollments per grade.
    Grades,
}

#[derive(Debug, Subcommand)]
pub enum DataSubcommand {
    /// Import students, courses and enrollments from a directory of CSV files.
    Import {
        /// Directory holding students.csv, courses.csv, enrollments.csv
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Export every record to a directory of CSV files.
    Export {
        /// Destination directory (created if missing)
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Copy the data directory into a timestamped backup folder.
    Backup,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage students.
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },
    /// Manage the course catalog.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Enroll a student in a course.
    ///
    /// Rejects duplicate enrollments and enrollments that would push the
    /// student's credits for the course's semester past the ceiling.
    Enroll {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
        /// Course code
        #[arg(value_name = "CODE")]
        course_code: String,
    },
    /// Withdraw a student from a course.
    Withdraw {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
        /// Course code
        #[arg(value_name = "CODE")]
        course_code: String,
    },
    /// Record a grade for an enrollment.
    Grade {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
        /// Course code
        #[arg(value_name = "CODE")]
        course_code: String,
        /// Grade: S, A, B, C, D, E, F or NOT_GRADED
        #[arg(value_name = "GRADE")]
        grade: Grade,
    },
    /// Show a student's credit-weighted GPA.
    Gpa {
        /// Registration number
        #[arg(value_name = "REGNO")]
        reg_no: String,
    },
    /// Print rankings and grade statistics.
    Report {
        #[command(subcommand)]
        subcommand: ReportSubcommand,
    },
    /// Import, export and back up the data directory.
    Data {
        #[command(subcommand)]
        subcommand: DataSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "ccrm",
    about = "Campus Course & Records Manager",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the data directory
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the backups directory
    #[arg(long = "backups-dir", value_name = "DIR")]
    pub backups_dir: Option<PathBuf>,

    /// Override the per-semester credit ceiling
    #[arg(long = "max-credits", value_name = "CREDITS", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_credits: Option<u32>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means the config value is kept.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            max_credits: self.max_credits,
            data_dir: self.data_dir.as_ref().map(path_string),
            backups_dir: self.backups_dir.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::try_parse_from(["ccrm", "gpa", "S1"]).expect("valid args");

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.max_credits.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.backups_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::try_parse_from([
            "ccrm",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--max-credits",
            "21",
            "--data-dir",
            "/srv/ccrm/data",
            "--backups-dir",
            "/srv/ccrm/backups",
            "report",
            "grades",
        ])
        .expect("valid args");

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.max_credits, Some(21));
        assert_eq!(overrides.data_dir, Some("/srv/ccrm/data".to_string()));
        assert_eq!(overrides.backups_dir, Some("/srv/ccrm/backups".to_string()));
    }

    #[test]
    fn test_zero_credit_ceiling_rejected() {
        assert!(Cli::try_parse_from(["ccrm", "--max-credits", "0", "gpa", "S1"]).is_err());
    }

    #[test]
    fn test_grade_and_semester_values_parse() {
        let cli = Cli::try_parse_from(["ccrm", "grade", "S1", "CS101", "not_graded"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Grade { grade: Grade::NotGraded, .. }
        ));

        let cli = Cli::try_parse_from(["ccrm", "course", "list", "--semester", "spring"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Course {
                subcommand: CourseSubcommand::List {
                    semester: Some(Semester::Spring),
                    ..
                }
            }
        ));

        assert!(Cli::try_parse_from(["ccrm", "grade", "S1", "CS101", "Z"]).is_err());
    }

    #[test]
    fn test_report_top_default_count() {
        let cli = Cli::try_parse_from(["ccrm", "report", "top"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Report {
                subcommand: ReportSubcommand::Top { count: 3 }
            }
        ));
    }
}

//! Configuration module for `CCRM`

use crate::core::engine::{EnrollmentPolicy, DEFAULT_MAX_CREDITS_PER_SEMESTER};
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory
const CCRM_VAR: &str = "$CCRM";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 7] = [
    "level",
    "file",
    "verbose",
    "max_credits",
    "allow_grade_changes",
    "data_dir",
    "backups_dir",
];

const fn default_max_credits() -> u32 {
    DEFAULT_MAX_CREDITS_PER_SEMESTER
}

const fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path (empty logs to the console)
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Enrollment rule configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentConfig {
    /// Credit ceiling per student per semester
    #[serde(default = "default_max_credits")]
    pub max_credits_per_semester: u32,
    /// Whether recorded grades may be overwritten
    #[serde(default = "default_true")]
    pub allow_grade_changes: bool,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            max_credits_per_semester: default_max_credits(),
            allow_grade_changes: default_true(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the CSV data files
    #[serde(default)]
    pub data_dir: String,
    /// Directory receiving timestamped backups
    #[serde(default)]
    pub backups_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Enrollment rules
    #[serde(default)]
    pub enrollment: EnrollmentConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the per-semester credit ceiling
    pub max_credits: Option<u32>,
    /// Override the data directory
    pub data_dir: Option<String>,
    /// Override the backups directory
    pub backups_dir: Option<String>,
}

impl Config {
    /// Get the `$CCRM` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/ccrm`
    /// - macOS: `~/Library/Application Support/ccrm`
    /// - Windows: `%APPDATA%\ccrm`
    #[must_use]
    pub fn get_ccrm_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ccrm")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only empty strings and a zero credit ceiling count as missing.
    /// Returns `true` if anything changed.
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.enrollment.max_credits_per_semester == 0 {
            self.enrollment.max_credits_per_semester = defaults.enrollment.max_credits_per_semester;
            changed = true;
        }

        if self.paths.data_dir.is_empty() && !defaults.paths.data_dir.is_empty() {
            self.paths.data_dir.clone_from(&defaults.paths.data_dir);
            changed = true;
        }
        if self.paths.backups_dir.is_empty() && !defaults.paths.backups_dir.is_empty() {
            self.paths.backups_dir.clone_from(&defaults.paths.backups_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for one run; nothing is written back to the file.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(max_credits) = overrides.max_credits {
            self.enrollment.max_credits_per_semester = max_credits;
        }

        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
        if let Some(backups_dir) = &overrides.backups_dir {
            self.paths.backups_dir = Self::expand_variables(backups_dir);
        }
    }

    /// Enrollment rules described by this config
    #[must_use]
    pub const fn enrollment_policy(&self) -> EnrollmentPolicy {
        EnrollmentPolicy {
            max_credits_per_semester: self.enrollment.max_credits_per_semester,
            allow_grade_changes: self.enrollment.allow_grade_changes,
        }
    }

    /// Data directory as a path
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.data_dir)
    }

    /// Backups directory as a path
    #[must_use]
    pub fn backups_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.backups_dir)
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_ccrm_dir`](Self::get_ccrm_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_ccrm_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CCRM` to the config directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(CCRM_VAR) {
            let ccrm_dir = Self::get_ccrm_dir();
            value.replace(CCRM_VAR, ccrm_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields take their serde defaults; `$CCRM` is
    /// expanded in path values.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.backups_dir = Self::expand_variables(&config.paths.backups_dir);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields filled from defaults (and is
    /// rewritten if that changed anything). On first run the defaults are
    /// written out. Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        let Ok(content) = fs::read_to_string(config_file) else {
            return defaults;
        };
        match Self::from_toml(&content) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            Err(err) => {
                crate::warn!("Ignoring unreadable config {}: {err}", config_file.display());
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot
    /// be serialized, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    /// Same as [`save`](Self::save)
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// See [`CONFIG_KEYS`]; `max_credits_per_semester` is accepted as an
    /// alias of `max_credits`, and dashes may replace underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "max_credits" | "max-credits" | "max_credits_per_semester" => {
                Some(self.enrollment.max_credits_per_semester.to_string())
            }
            "allow_grade_changes" | "allow-grade-changes" => {
                Some(self.enrollment.allow_grade_changes.to_string())
            }
            "data_dir" | "data-dir" => Some(self.paths.data_dir.clone()),
            "backups_dir" | "backups-dir" => Some(self.paths.backups_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error for an unknown key or a value of the wrong shape
    /// (unknown level, non-boolean flag, non-positive credit ceiling)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let level = Level::parse(value)
                    .ok_or_else(|| format!("Invalid log level: '{value}' (expected error, warn, info, debug)"))?;
                self.logging.level = level.to_string();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "max_credits" | "max-credits" | "max_credits_per_semester" => {
                self.enrollment.max_credits_per_semester = value
                    .parse::<u32>()
                    .ok()
                    .filter(|credits| *credits > 0)
                    .ok_or_else(|| format!("Invalid credit ceiling: '{value}' (expected a positive integer)"))?;
            }
            "allow_grade_changes" | "allow-grade-changes" => {
                self.enrollment.allow_grade_changes = parse_bool(key, value)?;
            }
            "data_dir" | "data-dir" => self.paths.data_dir = Self::expand_variables(value),
            "backups_dir" | "backups-dir" => self.paths.backups_dir = Self::expand_variables(value),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default
    ///
    /// Updates the in-memory config only; call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "max_credits" | "max-credits" | "max_credits_per_semester" => {
                self.enrollment.max_credits_per_semester = defaults.enrollment.max_credits_per_semester;
            }
            "allow_grade_changes" | "allow-grade-changes" => {
                self.enrollment.allow_grade_changes = defaults.enrollment.allow_grade_changes;
            }
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "backups_dir" | "backups-dir" => self
                .paths
                .backups_dir
                .clone_from(&defaults.paths.backups_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load`](Self::load) recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[enrollment]")?;
        writeln!(
            f,
            "  max_credits_per_semester = {}",
            self.enrollment.max_credits_per_semester
        )?;
        writeln!(
            f,
            "  allow_grade_changes = {}",
            self.enrollment.allow_grade_changes
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  backups_dir = \"{}\"", self.paths.backups_dir)?;

        Ok(())
    }
}

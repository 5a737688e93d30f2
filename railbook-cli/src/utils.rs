//! Utility functions for CLI operations.
//!
//! This module provides the helpers every command shares: data directory
//! resolution, configuration loading, opening the store, and timestamp
//! formatting.

use crate::error::CliError;
use railbook::config::OutputFormat;
use railbook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use railbook::{Config, ConfigBuilder, Database, DatabaseConfig};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // `verbose` only feeds logger setup in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the lock-wait timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` > `RAILBOOK_DATA_DIR` > `~/.railbook`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Lock-wait timeout: the global flag wins over the configuration file.
pub fn lock_wait(global: &GlobalOptions, config: &Config) -> Duration {
    global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), Duration::from_secs)
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    let mut db_config =
        DatabaseConfig::new(&db_path).with_busy_timeout(lock_wait(global, config));

    if global.disable_autoinit || config.autoinit_disabled() {
        if !db_path.exists() {
            return Err(CliError::NoDataDirectory);
        }
        db_config = db_config.without_auto_create();
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Pick the output format: an explicit `--format` wins over configuration.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Format a timestamp for table display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a timestamp for machine-readable output (RFC 3339, UTC).
pub fn format_timestamp_rfc3339(ts: SystemTime) -> String {
    use chrono::{DateTime, SecondsFormat, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert `csv::Error` to `CliError`.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Convert `serde_json::Error` to `CliError`.
pub fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_format_timestamp() {
        let st = UNIX_EPOCH + Duration::from_secs(1_705_323_045); // 2024-01-15 12:50:45 UTC
        assert_eq!(format_timestamp(st), "2024-01-15 12:50:45");
        assert_eq!(format_timestamp_rfc3339(st), "2024-01-15T12:50:45Z");
    }

    #[test]
    fn test_lock_wait_flag_wins() {
        let config = Config {
            maximum_lock_wait_seconds: Some(30),
            ..Config::default()
        };
        let mut global = GlobalOptions::default();
        assert_eq!(lock_wait(&global, &config), Duration::from_secs(30));

        global.busy_timeout = Some(2);
        assert_eq!(lock_wait(&global, &config), Duration::from_secs(2));
    }

    #[test]
    fn test_output_format_flag_wins() {
        let config = Config {
            output_format: Some(OutputFormat::Csv),
            ..Config::default()
        };
        assert_eq!(output_format(None, &config), OutputFormat::Csv);
        assert_eq!(
            output_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_open_database_respects_disable_autoinit() {
        let temp = tempfile::tempdir().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().join("missing")),
            disable_autoinit: true,
            ..GlobalOptions::default()
        };
        let err = open_database(&global, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoDataDirectory));
    }

    #[test]
    fn test_open_database_autoinits() {
        let temp = tempfile::tempdir().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().join("data")),
            ..GlobalOptions::default()
        };
        open_database(&global, &Config::default()).unwrap();
        assert!(temp.path().join("data").join(DATABASE_FILE_NAME).exists());
    }
}

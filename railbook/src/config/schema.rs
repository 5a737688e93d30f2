//! The settings railbook reads from `config.yaml` and the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lock wait, in seconds, when nothing is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Upper bound accepted for `maximum_lock_wait_seconds`.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// One configuration layer, or the merge of several.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to built-in defaults through the accessor methods.
///
/// # Examples
///
/// ```
/// use railbook::config::{Config, OutputFormat};
/// use std::time::Duration;
///
/// let config = Config {
///     maximum_lock_wait_seconds: Some(2),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.lock_wait(), Duration::from_secs(2));
/// assert!(!config.autoinit_disabled());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time a reservation waits for the inventory lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Require `railbook init` before any other command may create the database.
    pub disable_autoinit: Option<bool>,

    /// Default output format for listing commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the configured lock wait, or the default.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether implicit database creation is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Returns the configured output format, or the default.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use railbook::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// assert_eq!(OutputFormat::default(), OutputFormat::Table);
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-aligned text for terminals.
    #[default]
    Table,
    /// JSON output.
    Json,
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        })
    }
}

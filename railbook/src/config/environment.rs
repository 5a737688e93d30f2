//! `RAILBOOK_*` variables layered over the configuration file.

use std::env;

use clap::ValueEnum;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Overrides `maximum_lock_wait_seconds`.
pub const ENV_MAXIMUM_LOCK_WAIT_SECONDS: &str = "RAILBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `disable_autoinit`.
pub const ENV_DISABLE_AUTOINIT: &str = "RAILBOOK_DISABLE_AUTOINIT";
/// Overrides `output_format`.
pub const ENV_OUTPUT_FORMAT: &str = "RAILBOOK_OUTPUT_FORMAT";

/// The environment layer of configuration.
///
/// # Examples
///
/// ```no_run
/// use railbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Replaces each field of `config` whose variable is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`], with the variable name as the field,
    /// for the first value that does not parse.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(seconds) = Self::read(ENV_MAXIMUM_LOCK_WAIT_SECONDS, |s| {
            s.trim().parse::<u64>().map_err(|_| Error::Validation {
                field: ENV_MAXIMUM_LOCK_WAIT_SECONDS.into(),
                message: format!("'{s}' is not a whole number of seconds"),
            })
        })? {
            config.maximum_lock_wait_seconds = Some(seconds);
        }
        if let Some(flag) =
            Self::read(ENV_DISABLE_AUTOINIT, |s| Self::parse_bool(ENV_DISABLE_AUTOINIT, s))?
        {
            config.disable_autoinit = Some(flag);
        }
        if let Some(format) = Self::read(ENV_OUTPUT_FORMAT, Self::parse_output_format)? {
            config.output_format = Some(format);
        }
        Ok(())
    }

    fn read<T>(name: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
        env::var(name).ok().map(|value| parse(&value)).transpose()
    }

    /// true/false, 1/0, yes/no or on/off, any case.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("'{s}' is not a boolean (use true/false, 1/0, yes/no or on/off)"),
            }),
        }
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        OutputFormat::from_str(s.trim(), true).map_err(|_| Error::Validation {
            field: ENV_OUTPUT_FORMAT.into(),
            message: format!("'{s}' is not an output format (use table, json, csv or tsv)"),
        })
    }
}

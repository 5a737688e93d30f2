//! Range checks on merged configuration.

use crate::config::schema::{Config, MAX_LOCK_WAIT_SECONDS};
use crate::error::{Error, Result};

/// Rejects configuration values the coordinator cannot honor.
///
/// # Examples
///
/// ```
/// use railbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first field out of range.
    pub fn validate(config: &Config) -> Result<()> {
        match config.maximum_lock_wait_seconds {
            Some(seconds) if !(1..=MAX_LOCK_WAIT_SECONDS).contains(&seconds) => {
                Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!(
                        "lock wait of {seconds}s is outside 1..={MAX_LOCK_WAIT_SECONDS}"
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}

//! Reading `config.yaml` from the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// One parsed configuration file and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// Parsed configuration contents.
    pub config: Config,
}

/// Finds and parses configuration files.
///
/// # Examples
///
/// ```
/// use railbook::config::ConfigLoader;
///
/// # let dir = tempfile::tempdir().unwrap();
/// let sources = ConfigLoader::load_all(Some(dir.path())).unwrap();
/// assert!(sources.is_empty());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// The file layers for `data_dir`, weakest first. A missing file
    /// contributes no layer.
    ///
    /// With `data_dir` unset the directory comes from
    /// [`resolve_data_dir`](crate::database::resolve_data_dir).
    ///
    /// # Errors
    ///
    /// Fails when the data directory cannot be resolved, or when the file
    /// exists but cannot be read or parsed.
    pub fn load_all(data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::database::resolve_data_dir()?,
        };
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::trace!("no configuration file at {}", path.display());
            return Ok(Vec::new());
        }

        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(vec![ConfigSource { path, config }])
    }

    /// Parses one YAML file. Empty and comment-only files give
    /// [`Config::default`].
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when the file cannot be read,
    /// [`Error::Configuration`] when it is not valid YAML for [`Config`].
    pub fn load_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("cannot read configuration file: {e}"),
        })?;
        let parsed: Option<Config> = serde_yaml::from_str(&text)?;
        Ok(parsed.unwrap_or_default())
    }
}

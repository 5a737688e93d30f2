//! First-run setup of a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::database::DATABASE_FILE_NAME;
use crate::error::{Error, Result};
use crate::{Database, DatabaseConfig};

/// What `init` should do.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory that holds the database and configuration.
    pub data_dir: PathBuf,
    /// Replace an existing database. Every train and booking is lost.
    pub overwrite: bool,
    /// Also write a commented `config.yaml` unless one is already there.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir` with all flags off.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a default `config.yaml` is written.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What `init` actually did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory had to be created.
    pub data_dir_created: bool,
    /// Always true on success; the database is either new or recreated.
    pub database_created: bool,
    /// Whether a `config.yaml` was written.
    pub config_created: bool,
    /// The data directory that was initialized.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# railbook configuration

# Seconds a reservation waits for the inventory lock before failing (default: 5)
# maximum_lock_wait_seconds: 5

# Refuse to create the database implicitly on first use (default: false)
# disable_autoinit: false

# Default output format: table, json, csv or tsv (default: table)
# output_format: table
";

/// Prepares `options.data_dir` for use: the directory, an empty inventory
/// and, on request, a configuration template.
///
/// # Errors
///
/// - [`Error::Validation`] with field `database` when a database is
///   already present and `overwrite` is off.
/// - [`Error::Io`] when the directory, old files or template cannot be
///   created or removed.
/// - Any error from [`Database::open`].
///
/// # Examples
///
/// ```
/// use railbook::operations::{init_database, InitOptions};
///
/// # let temp = tempfile::tempdir().unwrap();
/// let options = InitOptions::new(temp.path().join("railbook")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// assert!(result.config_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let dir = &options.data_dir;
    let data_dir_created = !dir.exists();
    if data_dir_created {
        fs::create_dir_all(dir)?;
    }

    let db_path = dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "database already exists at {} (pass --overwrite to replace it)",
                    db_path.display()
                ),
            });
        }
        remove_database_files(&db_path)?;
        log::warn!("discarded existing inventory at {}", db_path.display());
    }

    Database::open(DatabaseConfig::new(&db_path))?;

    let config_created = options.create_config && write_config_template(dir)?;

    Ok(InitResult {
        data_dir_created,
        database_created: true,
        config_created,
        data_dir: dir.clone(),
    })
}

/// Writes the template unless a configuration file is already present.
fn write_config_template(dir: &Path) -> Result<bool> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(true)
}

/// Deletes the database and any `-wal`/`-shm` files next to it.
fn remove_database_files(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut name = db_path.as_os_str().to_owned();
        name.push(suffix);
        match fs::remove_file(PathBuf::from(name)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
    }
    Ok(())
}

//! Where the inventory database lives and how a connection to it behaves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the inventory database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "railbook.db";

/// Default time a writer waits for the inventory lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "RAILBOOK_DATA_DIR";

/// Name of the data directory under the user's home.
const DEFAULT_DIR_NAME: &str = ".railbook";

/// Parameters for [`Database::open`](super::Database::open).
///
/// `busy_timeout` is the lock-wait budget of every reservation made
/// through the handle: a writer blocked longer than this gives up with
/// [`Error::BookingFailed`] rather than waiting forever.
///
/// # Examples
///
/// ```
/// use railbook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::in_data_dir("/srv/railbook")
///     .with_busy_timeout(Duration::from_millis(250))
///     .without_auto_create();
///
/// assert!(config.path.ends_with("railbook.db"));
/// assert_eq!(config.busy_timeout.as_millis(), 250);
/// assert!(!config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file.
    pub path: PathBuf,
    /// Lock-wait budget for writers.
    pub busy_timeout: Duration,
    /// Create the file (and its parent directory) when missing.
    pub auto_create: bool,
    /// Open without write access. Implies `!auto_create`.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// A writable, auto-creating configuration for `path` with the default
    /// lock wait.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            auto_create: true,
            read_only: false,
        }
    }

    /// Configuration for `railbook.db` inside `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Replaces the lock-wait budget.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Fail with [`Error::DataDirectoryNotFound`] instead of creating a
    /// missing database.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Open for reads only. Such a handle can search routes and look up
    /// bookings but cannot begin a unit of work that writes.
    ///
    /// ```
    /// use railbook::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/railbook.db").read_only();
    /// assert!(config.read_only && !config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// `~/.railbook`.
///
/// # Errors
///
/// Returns [`Error::Validation`] if there is no home directory.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| Error::Validation {
            field: "data_dir".into(),
            message: format!("no home directory; set {DATA_DIR_ENV} or pass --data-dir"),
        })
}

/// `$RAILBOOK_DATA_DIR` when set and non-empty, else [`default_data_dir`].
///
/// # Errors
///
/// Same as [`default_data_dir`].
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// The database file inside [`resolve_data_dir`].
///
/// # Errors
///
/// Same as [`default_data_dir`].
pub fn resolve_database_path() -> Result<PathBuf> {
    resolve_data_dir().map(|dir| dir.join(DATABASE_FILE_NAME))
}

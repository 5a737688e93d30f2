//! The store handle.
//!
//! Every reservation depends on three connection settings: WAL so readers
//! never wait on the writer, a bounded busy timeout so writers never hang,
//! and enforced foreign keys.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// An open inventory database.
///
/// Each worker (thread or process) opens its own `Database`; handles are
/// never shared. Exclusion between workers comes from the database file
/// lock, so separate processes opening the same path serialize too.
///
/// # Examples
///
/// ```
/// use railbook::database::{Database, DatabaseConfig};
///
/// # let dir = tempfile::tempdir().unwrap();
/// let db = Database::open(DatabaseConfig::in_data_dir(dir.path())).unwrap();
/// assert!(Database::list_trains(db.connection()).unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens (and, if allowed, creates) the database described by `config`,
    /// then initializes or checks its schema.
    ///
    /// # Errors
    ///
    /// - [`Error::DataDirectoryNotFound`] if the file is missing and
    ///   `auto_create` is off.
    /// - [`Error::UnsupportedSchemaVersion`] if the file was written by an
    ///   incompatible version.
    /// - [`Error::Io`] or [`Error::Database`] if the directory or file cannot
    ///   be created, opened or configured.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(&config.path, open_flags(&config))?;

        // busy_timeout goes first so the remaining PRAGMAs wait on a busy file too
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // PRAGMA journal_mode returns a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        super::migrations::check_schema_compatibility(&conn, !config.read_only)?;

        log::debug!(
            "opened inventory database at {} (busy timeout {}ms)",
            config.path.display(),
            config.busy_timeout.as_millis()
        );

        Ok(Self { conn, config })
    }

    /// The underlying connection. Route search and booking lookup read
    /// through it without taking the write lock.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The configuration this handle was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

fn open_flags(config: &DatabaseConfig) -> OpenFlags {
    let access = if config.read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    } else if config.auto_create {
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE
    };
    access | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

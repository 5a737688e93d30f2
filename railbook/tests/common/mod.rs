//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use railbook::{Database, DatabaseConfig, NewTrain, Train, User};
use tempfile::TempDir;

/// A database file in a temporary directory.
///
/// Each call to [`TestStore::open`] returns an independent connection to the
/// same file, the way separate workers would open it.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Creates the temporary directory and initializes the schema.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("railbook.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { _dir: dir, path }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection with the default busy timeout.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }

    /// Opens a new connection with a custom busy timeout.
    pub fn open_with_timeout(&self, timeout: Duration) -> Database {
        Database::open(DatabaseConfig::new(&self.path).with_busy_timeout(timeout)).unwrap()
    }

    /// Registers a user.
    pub fn user(&self, username: &str) -> User {
        self.open().create_user(username).unwrap()
    }

    /// Adds a train between two stations.
    pub fn train(&self, source: &str, destination: &str, seats: i64) -> Train {
        let new_train =
            NewTrain::new(format!("{source} Express"), source, destination, seats).unwrap();
        self.open().create_train(&new_train).unwrap()
    }

    /// Reads the committed state of a train.
    pub fn reload(&self, train: &Train) -> Train {
        Database::get_train(self.open().connection(), train.id())
            .unwrap()
            .unwrap()
    }

    /// Sum of booked seats on a train.
    pub fn booked_seats(&self, train: &Train) -> u32 {
        Database::list_bookings_for_train(self.open().connection(), train.id())
            .unwrap()
            .iter()
            .map(|b| b.seat_count().value())
            .sum()
    }

    /// Asserts `available = total - booked` for every train.
    pub fn assert_consistent(&self) {
        let discrepancies = Database::audit_inventory(self.open().connection()).unwrap();
        assert!(
            discrepancies.is_empty(),
            "inventory out of sync: {discrepancies:?}"
        );
    }
}

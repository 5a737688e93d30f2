//! Fixtures for the unit tests under `database` and `operations`.

use crate::database::{Database, DatabaseConfig};
use crate::train::{NewTrain, Train};
use crate::user::User;

/// A fresh inventory in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    // `keep` detaches the directory from the guard so the file survives
    let dir = tempfile::Builder::new()
        .prefix("railbook-test")
        .tempdir()
        .unwrap()
        .keep();
    Database::open(DatabaseConfig::in_data_dir(dir)).unwrap()
}

/// Inserts a train named after its route.
///
/// # Panics
///
/// Panics if the train cannot be created.
pub fn create_test_train(db: &mut Database, source: &str, destination: &str, seats: i64) -> Train {
    let name = format!("{source}-{destination}");
    let train = NewTrain::new(name, source, destination, seats).unwrap();
    db.create_train(&train).unwrap()
}

/// Registers a user.
///
/// # Panics
///
/// Panics if the user cannot be created.
pub fn create_test_user(db: &mut Database, username: &str) -> User {
    db.create_user(username).unwrap()
}

//! Inventory store backed by SQLite.
//!
//! This module owns every durable record: users, trains and bookings. It
//! provides connection management, schema versioning, non-locking reads,
//! and the [`UnitOfWork`] through which seat counters are mutated.
//!
//! # Examples
//!
//! ```
//! use railbook::database::{Database, DatabaseConfig};
//! use railbook::NewTrain;
//!
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("railbook.db");
//! let mut db = Database::open(DatabaseConfig::new(path)).unwrap();
//!
//! db.create_train(&NewTrain::new("Deccan Queen", "Pune", "Mumbai", 300).unwrap())
//!     .unwrap();
//!
//! let trains = Database::find_routes(db.connection(), "Pune", "Mumbai").unwrap();
//! assert_eq!(trains.len(), 1);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig,
    DATABASE_FILE_NAME, DATA_DIR_ENV, DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub use operations::InventoryDiscrepancy;
pub use transaction::UnitOfWork;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

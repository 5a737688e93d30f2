//! Schema versioning.
//!
//! The version lives in the `metadata` table. A missing table or row reads
//! as version 0, meaning the file has never been initialized.

use rusqlite::{Connection, ErrorCode};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_TABLE, CREATE_BOOKING_TRAIN_INDEX, CREATE_BOOKING_USER_INDEX,
    CREATE_METADATA_TABLE, CREATE_ROUTE_INDEX, CREATE_TRAINS_TABLE, CREATE_USERS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Statements that build an empty inventory, in dependency order.
const SCHEMA_OBJECTS: [&str; 7] = [
    CREATE_METADATA_TABLE,
    CREATE_USERS_TABLE,
    CREATE_TRAINS_TABLE,
    CREATE_BOOKINGS_TABLE,
    CREATE_ROUTE_INDEX,
    CREATE_BOOKING_TRAIN_INDEX,
    CREATE_BOOKING_USER_INDEX,
];

/// Builds the tables and stamps the version.
///
/// Runs under the write lock and rechecks the version once the lock is
/// held, so two processes racing to initialize the same file create it
/// once. Nothing is left behind if a statement fails.
///
/// # Errors
///
/// Returns [`Error::Database`] if the lock cannot be taken or a statement
/// fails.
///
/// ```
/// use rusqlite::Connection;
/// use railbook::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    if let Err(e) = create_objects(conn) {
        conn.execute_batch("ROLLBACK")?;
        return Err(e);
    }
    conn.execute_batch("COMMIT")?;
    Ok(())
}

fn create_objects(conn: &Connection) -> Result<()> {
    if get_schema_version(conn)? != 0 {
        return Ok(());
    }
    for statement in SCHEMA_OBJECTS {
        conn.execute(statement, [])?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    log::info!("initialized inventory schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// The stored schema version, or 0 for an uninitialized file.
///
/// # Errors
///
/// Returns [`Error::Database`] for any failure other than a missing
/// `metadata` table or version row.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let stored = conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0));
    let text = match stored {
        Ok(text) => text,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(0),
        // "no such table" is reported as a plain SQLITE_ERROR
        Err(rusqlite::Error::SqliteFailure(ref failure, _))
            if failure.code == ErrorCode::Unknown =>
        {
            return Ok(0)
        }
        Err(e) => return Err(e.into()),
    };
    text.trim().parse().map_err(|_| Error::Validation {
        field: "schema_version".into(),
        message: format!("stored schema version '{text}' is not a number"),
    })
}

/// Makes sure the file holds a schema this build understands, creating it
/// when the file is empty and `allow_init` is set.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version
/// differs from [`CURRENT_SCHEMA_VERSION`], or when the file is empty and
/// `allow_init` is false (a read-only handle cannot create tables).
pub fn check_schema_compatibility(conn: &Connection, allow_init: bool) -> Result<()> {
    match get_schema_version(conn)? {
        CURRENT_SCHEMA_VERSION => Ok(()),
        0 if allow_init => initialize_schema(conn),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        }),
    }
}

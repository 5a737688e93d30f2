//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the inventory database.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the trains table.
///
/// The CHECK constraint is the last line of defence for the seat invariant:
/// a write that would leave the counter negative or above capacity is
/// rejected by the store and aborts the enclosing transaction.
pub const CREATE_TRAINS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS trains (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        source_station TEXT NOT NULL,
        destination_station TEXT NOT NULL,
        total_seats INTEGER NOT NULL CHECK (total_seats > 0),
        available_seats INTEGER NOT NULL
            CHECK (available_seats >= 0 AND available_seats <= total_seats)
    )";

/// SQL statement to create the bookings table.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        train_id INTEGER NOT NULL REFERENCES trains(id),
        seat_count INTEGER NOT NULL CHECK (seat_count > 0),
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the route index used by route search.
pub const CREATE_ROUTE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_trains_route \
     ON trains(source_station, destination_station)";

/// SQL statement to create an index on bookings by train.
pub const CREATE_BOOKING_TRAIN_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_train ON bookings(train_id)";

/// SQL statement to create an index on bookings by user.
pub const CREATE_BOOKING_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings(user_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every train query.
pub const TRAIN_COLUMNS: &str =
    "id, name, source_station, destination_station, total_seats, available_seats";

/// Column list shared by every booking query.
pub const BOOKING_COLUMNS: &str = "id, user_id, train_id, seat_count, created_at";

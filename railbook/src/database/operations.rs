//! Non-locking reads and admin inserts.
//!
//! Everything here either only reads committed state or inserts rows that
//! do not touch an existing seat counter. Seat mutation lives exclusively in
//! [`UnitOfWork`](super::UnitOfWork).

use std::time::{Duration, SystemTime};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::Serialize;

use crate::booking::{Booking, BookingDetails, BookingId, SeatCount, TrainSummary, UserSummary};
use crate::error::{Error, Result};
use crate::train::{normalize_name, NewTrain, Train, TrainId};
use crate::user::{validate_username, User, UserId};

use super::connection::Database;
use super::schema::{BOOKING_COLUMNS, TRAIN_COLUMNS};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(err))
}

/// Deserializes a train from a row selected with `TRAIN_COLUMNS`.
pub(super) fn row_to_train(row: &rusqlite::Row<'_>) -> rusqlite::Result<Train> {
    let id = TrainId::try_from(row.get::<_, i64>(0)?).map_err(|e| conversion_error(0, e))?;
    Train::from_parts(
        id,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    )
    .map_err(|e| conversion_error(5, e))
}

/// Deserializes a booking from a row selected with `BOOKING_COLUMNS`.
pub(super) fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id = BookingId::try_from(row.get::<_, i64>(0)?).map_err(|e| conversion_error(0, e))?;
    let user_id = UserId::try_from(row.get::<_, i64>(1)?).map_err(|e| conversion_error(1, e))?;
    let train_id = TrainId::try_from(row.get::<_, i64>(2)?).map_err(|e| conversion_error(2, e))?;
    let seat_count =
        SeatCount::try_from(row.get::<_, i64>(3)?).map_err(|e| conversion_error(3, e))?;
    let created_at = unix_secs_to_systemtime(row.get(4)?);

    Ok(Booking::from_parts(
        id, user_id, train_id, seat_count, created_at,
    ))
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id = UserId::try_from(row.get::<_, i64>(0)?).map_err(|e| conversion_error(0, e))?;
    Ok(User::from_parts(
        id,
        row.get(1)?,
        unix_secs_to_systemtime(row.get(2)?),
    ))
}

const INSERT_USER: &str = "INSERT INTO users (username, created_at) VALUES (?, ?)";

const SELECT_USER_BY_ID: &str = "SELECT id, username, created_at FROM users WHERE id = ?";

const SELECT_USER_BY_NAME: &str = "SELECT id, username, created_at FROM users WHERE username = ?";

const INSERT_TRAIN: &str = r"
    INSERT INTO trains
    (name, source_station, destination_station, total_seats, available_seats)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_BOOKING_DETAILS: &str = r"
    SELECT b.id, b.user_id, b.train_id, b.seat_count, b.created_at,
           u.username,
           t.name, t.source_station, t.destination_station
    FROM bookings b
    JOIN users u ON u.id = b.user_id
    JOIN trains t ON t.id = b.train_id
    WHERE b.id = ?
";

const SELECT_INVENTORY_DISCREPANCIES: &str = r"
    SELECT t.id, t.total_seats, t.available_seats, COALESCE(SUM(b.seat_count), 0)
    FROM trains t
    LEFT JOIN bookings b ON b.train_id = t.id
    GROUP BY t.id
    HAVING t.available_seats != t.total_seats - COALESCE(SUM(b.seat_count), 0)
    ORDER BY t.id
";

/// A train whose counter disagrees with its bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryDiscrepancy {
    /// The affected train.
    pub train_id: TrainId,
    /// Fixed capacity.
    pub total_seats: i64,
    /// Stored available counter.
    pub available_seats: i64,
    /// Sum of seat counts over the train's bookings.
    pub booked_seats: i64,
}

impl InventoryDiscrepancy {
    /// Returns the counter value the bookings imply.
    #[must_use]
    pub const fn expected_available(&self) -> i64 {
        self.total_seats - self.booked_seats
    }
}

impl Database {
    /// Registers a user principal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the username is malformed or
    /// already registered, or a database error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use railbook::database::{Database, DatabaseConfig};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
    /// let alice = db.create_user("alice").unwrap();
    /// assert_eq!(alice.username(), "alice");
    /// assert!(db.create_user("alice").is_err());
    /// ```
    pub fn create_user(&mut self, username: &str) -> Result<User> {
        let username = validate_username(username)?;
        let now = SystemTime::now();
        let created_secs = systemtime_to_unix_secs(now)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists = tx
            .query_row(SELECT_USER_BY_NAME, [&username], |_| Ok(()))
            .optional()?
            .is_some();
        if exists {
            return Err(Error::InvalidRequest {
                field: "username".into(),
                message: format!("user '{username}' already exists"),
            });
        }

        tx.execute(INSERT_USER, params![username, created_secs])?;
        let id = UserId::try_from(tx.last_insert_rowid())?;
        tx.commit()?;

        log::info!("registered user {id} ({username})");
        Ok(User::from_parts(id, username, unix_secs_to_systemtime(created_secs)))
    }

    /// Looks up a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
        Ok(conn
            .query_row(SELECT_USER_BY_ID, [id.value()], row_to_user)
            .optional()?)
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        Ok(conn
            .query_row(SELECT_USER_BY_NAME, [username.trim()], row_to_user)
            .optional()?)
    }

    /// Inserts a new train with all seats available.
    ///
    /// This is the admin insert. It never touches an existing counter, so it
    /// does not go through a reservation unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or the insert fails.
    pub fn create_train(&mut self, train: &NewTrain) -> Result<Train> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_TRAIN,
            params![
                train.name(),
                train.source_station(),
                train.destination_station(),
                train.total_seats(),
                train.total_seats(),
            ],
        )?;
        let id = TrainId::try_from(tx.last_insert_rowid())?;
        tx.commit()?;

        log::info!(
            "added train {id} ({}) {} -> {} with {} seats",
            train.name(),
            train.source_station(),
            train.destination_station(),
            train.total_seats()
        );

        Ok(Train::from_parts(
            id,
            train.name().to_string(),
            train.source_station().to_string(),
            train.destination_station().to_string(),
            train.total_seats(),
            train.total_seats(),
        )?)
    }

    /// Reads a train without locking it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_train(conn: &Connection, id: TrainId) -> Result<Option<Train>> {
        let sql = format!("SELECT {TRAIN_COLUMNS} FROM trains WHERE id = ?");
        Ok(conn.query_row(&sql, [id.value()], row_to_train).optional()?)
    }

    /// Finds all trains running from `source` to `destination`.
    ///
    /// This is a plain read: it never waits on an in-flight reservation and
    /// sees each train either before or after a committed booking. An empty
    /// result means no train serves the route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if either station is blank, or a
    /// database error if the query fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use railbook::database::{Database, DatabaseConfig};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
    /// let trains = Database::find_routes(db.connection(), "Pune", "Mumbai").unwrap();
    /// assert!(trains.is_empty());
    /// ```
    pub fn find_routes(conn: &Connection, source: &str, destination: &str) -> Result<Vec<Train>> {
        let source = normalize_name("source_station", source)?;
        let destination = normalize_name("destination_station", destination)?;

        let sql = format!(
            "SELECT {TRAIN_COLUMNS} FROM trains \
             WHERE source_station = ? AND destination_station = ? ORDER BY id"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let trains = stmt
            .query_map(params![source, destination], row_to_train)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(trains)
    }

    /// Lists every train ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_trains(conn: &Connection) -> Result<Vec<Train>> {
        let sql = format!("SELECT {TRAIN_COLUMNS} FROM trains ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let trains = stmt
            .query_map([], row_to_train)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(trains)
    }

    /// Looks up a booking together with its user and train.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(details))` if the booking exists
    /// - `Ok(None)` if it doesn't
    pub fn get_booking(conn: &Connection, id: BookingId) -> Result<Option<BookingDetails>> {
        let details = conn
            .query_row(SELECT_BOOKING_DETAILS, [id.value()], |row| {
                let booking = row_to_booking(row)?;
                let user = UserSummary {
                    id: booking.user_id(),
                    username: row.get(5)?,
                };
                let train = TrainSummary {
                    id: booking.train_id(),
                    name: row.get(6)?,
                    source_station: row.get(7)?,
                    destination_station: row.get(8)?,
                };
                Ok(BookingDetails {
                    booking,
                    user,
                    train,
                })
            })
            .optional()?;
        Ok(details)
    }

    /// Lists the bookings on a train, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_train(conn: &Connection, train_id: TrainId) -> Result<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE train_id = ? ORDER BY id");
        let mut stmt = conn.prepare_cached(&sql)?;
        let bookings = stmt
            .query_map([train_id.value()], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Lists the bookings owned by a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ? ORDER BY id");
        let mut stmt = conn.prepare_cached(&sql)?;
        let bookings = stmt
            .query_map([user_id.value()], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Finds trains whose available counter disagrees with their bookings.
    ///
    /// An empty result means `available = total - sum(booked seats)` holds
    /// for every train.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_inventory(conn: &Connection) -> Result<Vec<InventoryDiscrepancy>> {
        let mut stmt = conn.prepare(SELECT_INVENTORY_DISCREPANCIES)?;
        let discrepancies = stmt
            .query_map([], |row| {
                let train_id =
                    TrainId::try_from(row.get::<_, i64>(0)?).map_err(|e| conversion_error(0, e))?;
                Ok(InventoryDiscrepancy {
                    train_id,
                    total_seats: row.get(1)?,
                    available_seats: row.get(2)?,
                    booked_seats: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(discrepancies)
    }

    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}

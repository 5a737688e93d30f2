//! Units of work for seat mutation.
//!
//! A [`UnitOfWork`] wraps an IMMEDIATE SQLite transaction. Opening one takes
//! the database write lock, so every other writer (in this process or any
//! other process using the same file) waits until it commits or rolls back.
//! Readers on other connections keep seeing the last committed state.
//!
//! Seat counters can only be changed through a unit of work.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::booking::{Booking, BookingId, SeatCount};
use crate::error::{Error, Result};
use crate::train::{Train, TrainId};
use crate::user::UserId;

use super::connection::Database;
use super::operations::{row_to_train, systemtime_to_unix_secs, unix_secs_to_systemtime};
use super::schema::TRAIN_COLUMNS;

const UPDATE_AVAILABLE_SEATS: &str = "UPDATE trains SET available_seats = ? WHERE id = ?";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (user_id, train_id, seat_count, created_at)
    VALUES (?, ?, ?, ?)
";

/// An open, locked unit of work on the inventory store.
///
/// Dropping a unit of work without calling [`commit`](Self::commit) rolls it
/// back.
#[derive(Debug)]
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl Database {
    /// Begins a unit of work, acquiring the database write lock.
    ///
    /// Waits up to the configured busy timeout for a competing writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the lock cannot be acquired in time
    /// (`SQLITE_BUSY`) or the transaction cannot be started.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::NewTrain;
    /// # use railbook::database::{Database, DatabaseConfig};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
    /// let train = db.create_train(&NewTrain::new("Express", "A", "B", 3).unwrap()).unwrap();
    ///
    /// let uow = db.begin_unit_of_work().unwrap();
    /// let locked = uow.lock_train_for_update(train.id()).unwrap().unwrap();
    /// assert_eq!(locked.available_seats(), 3);
    /// uow.rollback().unwrap();
    /// ```
    pub fn begin_unit_of_work(&mut self) -> Result<UnitOfWork<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(UnitOfWork { tx })
    }
}

impl UnitOfWork<'_> {
    /// Reads a train under the unit of work's lock.
    ///
    /// The write lock is already held, so the returned counter cannot change
    /// underneath the caller until this unit of work ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lock_train_for_update(&self, id: TrainId) -> Result<Option<Train>> {
        let sql = format!("SELECT {TRAIN_COLUMNS} FROM trains WHERE id = ?");
        Ok(self
            .tx
            .query_row(&sql, [id.value()], row_to_train)
            .optional()?)
    }

    /// Persists a train's available counter within this unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the train row does not exist, or a
    /// database error if the update fails (including CHECK violations).
    pub fn save_train(&self, train: &Train) -> Result<()> {
        let rows = self.tx.execute(
            UPDATE_AVAILABLE_SEATS,
            params![train.available_seats(), train.id().value()],
        )?;
        if rows == 0 {
            return Err(Error::NotFound {
                resource: format!("train {}", train.id()),
            });
        }
        Ok(())
    }

    /// Inserts a booking row within this unit of work.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub fn create_booking(
        &self,
        user_id: UserId,
        train_id: TrainId,
        seat_count: SeatCount,
    ) -> Result<Booking> {
        let created_secs = systemtime_to_unix_secs(SystemTime::now())?;
        self.tx.execute(
            INSERT_BOOKING,
            params![
                user_id.value(),
                train_id.value(),
                seat_count.value(),
                created_secs
            ],
        )?;
        let id = BookingId::try_from(self.tx.last_insert_rowid())?;

        Ok(Booking::from_parts(
            id,
            user_id,
            train_id,
            seat_count,
            unix_secs_to_systemtime(created_secs),
        ))
    }

    /// Checks that a user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self
            .tx
            .query_row(
                "SELECT 1 FROM users WHERE id = ?",
                [user_id.value()],
                |_| Ok(()),
            )
            .optional()?
            .is_some())
    }

    /// Returns the underlying connection for reads inside the unit of work.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.tx
    }

    /// Commits every write made in this unit of work and releases the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails; nothing is applied in that case.
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    /// Discards every write made in this unit of work and releases the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        Ok(())
    }
}

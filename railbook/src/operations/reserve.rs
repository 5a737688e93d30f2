//! The seat reservation transaction.
//!
//! [`ReservationCoordinator::reserve_seats`] validates a request, opens a
//! [`UnitOfWork`](crate::database::UnitOfWork), locks the train, decrements
//! its counter, records the booking and commits. Any failure before commit
//! rolls the whole unit back, so a request either leaves exactly one booking
//! and a matching counter decrement or no trace at all.

use crate::booking::{Booking, SeatCount};
use crate::database::{Database, UnitOfWork};
use crate::error::{BookingFailureReason, Error, Result};
use crate::train::TrainId;
use crate::user::UserId;

/// A raw reservation request as received from a caller.
///
/// Fields are kept unvalidated so that malformed input is reported as
/// [`Error::InvalidRequest`] by [`ReservationCoordinator::reserve_seats`]
/// rather than rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    /// The authenticated principal making the request.
    pub user_id: UserId,
    /// The train to reserve on. Required.
    pub train_id: Option<i64>,
    /// Number of seats requested. Must be positive.
    pub seat_count: i64,
}

impl ReserveRequest {
    /// Creates a new request.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::operations::ReserveRequest;
    /// use railbook::UserId;
    ///
    /// let request = ReserveRequest::new(UserId::try_from(1).unwrap(), Some(4), 2);
    /// assert!(request.validate().is_ok());
    ///
    /// let request = ReserveRequest::new(UserId::try_from(1).unwrap(), None, 2);
    /// assert!(request.validate().is_err());
    /// ```
    #[must_use]
    pub const fn new(user_id: UserId, train_id: Option<i64>, seat_count: i64) -> Self {
        Self {
            user_id,
            train_id,
            seat_count,
        }
    }

    /// Checks the request shape without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the train identifier is missing
    /// or not positive, or if the seat count is not a positive integer.
    pub fn validate(&self) -> Result<(TrainId, SeatCount)> {
        let raw_train = self.train_id.ok_or_else(|| Error::InvalidRequest {
            field: "train_id".into(),
            message: "train id is required".into(),
        })?;
        let train_id = TrainId::try_from(raw_train)?;
        let seat_count = SeatCount::try_from(self.seat_count)?;
        Ok((train_id, seat_count))
    }
}

/// Runs reservations against an explicitly opened store.
///
/// The coordinator holds no state of its own. The serializing lock lives in
/// the database file, so coordinators in different threads or processes
/// (each with its own [`Database`]) never jointly oversell a train.
pub struct ReservationCoordinator<'a> {
    db: &'a mut Database,
}

impl<'a> ReservationCoordinator<'a> {
    /// Creates a coordinator over the given store handle.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Reserves seats on a train for a user.
    ///
    /// The first request to acquire the train's lock wins. A request that
    /// loses the race either sees the decremented counter and is rejected
    /// with [`Error::InsufficientSeats`], or times out waiting for the lock
    /// and is reported as [`Error::BookingFailed`]. There is no internal
    /// retry.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`]: malformed train id or seat count; the
    ///   store is not touched.
    /// - [`Error::NotFound`]: the train or the user does not exist.
    /// - [`Error::InsufficientSeats`]: fewer seats available than requested.
    /// - [`Error::BookingFailed`]: the lock could not be acquired, or the
    ///   store failed before commit. Nothing was applied; safe to retry.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::operations::{ReservationCoordinator, ReserveRequest};
    /// use railbook::{Error, NewTrain};
    /// # use railbook::database::{Database, DatabaseConfig};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
    /// let user = db.create_user("alice").unwrap();
    /// let train = db
    ///     .create_train(&NewTrain::new("Shatabdi", "Delhi", "Agra", 2).unwrap())
    ///     .unwrap();
    ///
    /// let mut coordinator = ReservationCoordinator::new(&mut db);
    /// let request = ReserveRequest::new(user.id(), Some(train.id().value()), 2);
    /// let booking = coordinator.reserve_seats(&request).unwrap();
    /// assert_eq!(booking.seat_count().value(), 2);
    ///
    /// let again = coordinator.reserve_seats(&request).unwrap_err();
    /// assert!(matches!(again, Error::InsufficientSeats { .. }));
    /// ```
    pub fn reserve_seats(&mut self, request: &ReserveRequest) -> Result<Booking> {
        let (train_id, seat_count) = request.validate()?;

        let uow = self.db.begin_unit_of_work().map_err(abort_error)?;
        log::debug!("acquired inventory lock for train {train_id}");

        match apply_reservation(&uow, request.user_id, train_id, seat_count) {
            Ok(booking) => {
                uow.commit().map_err(abort_error)?;
                log::info!(
                    "booking {} created: user {} reserved {} seat(s) on train {}",
                    booking.id(),
                    booking.user_id(),
                    booking.seat_count(),
                    booking.train_id()
                );
                Ok(booking)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback() {
                    log::warn!("rollback failed for train {train_id}");
                    log::debug!("rollback error: {rollback_err}");
                }
                let err = abort_error(err);
                match &err {
                    // The store's own message stays below the default level
                    Error::BookingFailed { reason, source } => {
                        log::warn!("reservation on train {train_id} aborted: {reason}");
                        log::debug!("store error for train {train_id}: {source}");
                    }
                    other => log::debug!("reservation on train {train_id} rejected: {other}"),
                }
                Err(err)
            }
        }
    }
}

/// The locked part of a reservation. Every write goes through `uow`.
fn apply_reservation(
    uow: &UnitOfWork<'_>,
    user_id: UserId,
    train_id: TrainId,
    seat_count: SeatCount,
) -> Result<Booking> {
    if !uow.user_exists(user_id)? {
        return Err(Error::NotFound {
            resource: format!("user {user_id}"),
        });
    }

    let mut train = uow
        .lock_train_for_update(train_id)?
        .ok_or_else(|| Error::NotFound {
            resource: format!("train {train_id}"),
        })?;

    train.take_seats(seat_count)?;
    uow.save_train(&train)?;
    uow.create_booking(user_id, train_id, seat_count)
}

/// Maps an error raised inside a unit of work to the caller-facing outcome.
///
/// Business rejections pass through unchanged; every other failure becomes
/// [`Error::BookingFailed`].
fn abort_error(err: Error) -> Error {
    match err {
        Error::NotFound { .. } | Error::InsufficientSeats { .. } | Error::BookingFailed { .. } => {
            err
        }
        Error::Database(source) => Error::booking_failed(source),
        other => Error::BookingFailed {
            reason: BookingFailureReason::Storage,
            source: Box::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, create_test_train, create_test_user};
    use crate::ErrorKind;

    #[test]
    fn test_validate_requires_train() {
        let request = ReserveRequest::new(UserId::try_from(1).unwrap(), None, 1);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { ref field, .. } if field == "train_id"));
    }

    #[test]
    fn test_validate_rejects_non_positive_values() {
        let user = UserId::try_from(1).unwrap();
        for (train, seats) in [(Some(0), 1), (Some(-4), 1), (Some(1), 0), (Some(1), -2)] {
            let err = ReserveRequest::new(user, train, seats).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRequest, "{train:?} {seats}");
        }
    }

    #[test]
    fn test_reserve_decrements_and_records() {
        let mut db = create_test_database();
        let user = create_test_user(&mut db, "gina");
        let train = create_test_train(&mut db, "A", "B", 5);

        let request = ReserveRequest::new(user.id(), Some(train.id().value()), 3);
        let booking = ReservationCoordinator::new(&mut db)
            .reserve_seats(&request)
            .unwrap();

        assert_eq!(booking.user_id(), user.id());
        assert_eq!(booking.train_id(), train.id());
        assert_eq!(booking.seat_count().value(), 3);

        let stored = Database::get_train(db.connection(), train.id())
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_seats(), 2);
    }

    #[test]
    fn test_reserve_invalid_request_touches_nothing() {
        let mut db = create_test_database();
        let user = create_test_user(&mut db, "hank");
        let train = create_test_train(&mut db, "A", "B", 5);

        let request = ReserveRequest::new(user.id(), Some(train.id().value()), 0);
        let err = ReservationCoordinator::new(&mut db)
            .reserve_seats(&request)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(Database::list_bookings_for_train(db.connection(), train.id())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reserve_missing_train() {
        let mut db = create_test_database();
        let user = create_test_user(&mut db, "iris");

        let request = ReserveRequest::new(user.id(), Some(404), 1);
        let err = ReservationCoordinator::new(&mut db)
            .reserve_seats(&request)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reserve_missing_user() {
        let mut db = create_test_database();
        let train = create_test_train(&mut db, "A", "B", 5);

        let request = ReserveRequest::new(UserId::try_from(31).unwrap(), Some(train.id().value()), 1);
        let err = ReservationCoordinator::new(&mut db)
            .reserve_seats(&request)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { ref resource } if resource == "user 31"));

        let stored = Database::get_train(db.connection(), train.id())
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_seats(), 5);
    }

    #[test]
    fn test_reserve_insufficient_keeps_counter() {
        let mut db = create_test_database();
        let user = create_test_user(&mut db, "jack");
        let train = create_test_train(&mut db, "A", "B", 2);

        let request = ReserveRequest::new(user.id(), Some(train.id().value()), 3);
        let err = ReservationCoordinator::new(&mut db)
            .reserve_seats(&request)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientSeats);

        let stored = Database::get_train(db.connection(), train.id())
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_seats(), 2);
    }

    #[test]
    fn test_abort_error_passes_business_rejections() {
        let err = abort_error(Error::NotFound {
            resource: "train 1".into(),
        });
        assert!(err.is_not_found());

        let err = abort_error(Error::Database(rusqlite::Error::QueryReturnedNoRows));
        assert!(matches!(
            err,
            Error::BookingFailed {
                reason: BookingFailureReason::Storage,
                ..
            }
        ));

        let err = abort_error(Error::Validation {
            field: "timestamp".into(),
            message: "before epoch".into(),
        });
        assert_eq!(err.kind(), ErrorKind::BookingFailed);
    }
}

//! Booking lookup and route search entry points.
//!
//! These are plain reads: they never wait on the inventory lock and only
//! observe committed state.

use rusqlite::Connection;

use crate::booking::{BookingDetails, BookingId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::train::Train;

/// Fetches a booking with its user and train summaries.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if `booking_id` is not positive,
/// [`Error::NotFound`] if no such booking exists, or a database error.
///
/// # Examples
///
/// ```
/// use railbook::operations::get_booking_details;
/// # use railbook::database::{Database, DatabaseConfig};
/// # let dir = tempfile::tempdir().unwrap();
/// # let db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
/// let err = get_booking_details(db.connection(), 12).unwrap_err();
/// assert!(err.is_not_found());
/// ```
pub fn get_booking_details(conn: &Connection, booking_id: i64) -> Result<BookingDetails> {
    let id = BookingId::try_from(booking_id)?;
    Database::get_booking(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("booking {id}"),
    })
}

/// Searches for trains serving a route.
///
/// An empty list is a valid answer, not an error.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if either station is blank, or a
/// database error.
pub fn search_routes(conn: &Connection, source: &str, destination: &str) -> Result<Vec<Train>> {
    let trains = Database::find_routes(conn, source, destination)?;
    log::debug!(
        "route search {} -> {} matched {} train(s)",
        source.trim(),
        destination.trim(),
        trains.len()
    );
    Ok(trains)
}

//! Booking types.
//!
//! A [`Booking`] records one successful reservation: who reserved how many
//! seats on which train, and when. Bookings are immutable once committed.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::train::TrainId;
use crate::user::UserId;

/// Store-generated identifier of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for BookingId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::new(
                "booking_id",
                format!("booking id must be a positive integer, got {value}"),
            ));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positive number of seats.
///
/// # Examples
///
/// ```
/// use railbook::SeatCount;
///
/// assert_eq!(SeatCount::try_from(2).unwrap().value(), 2);
/// assert!(SeatCount::try_from(0).is_err());
/// assert!(SeatCount::try_from(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatCount(u32);

impl SeatCount {
    /// Returns the number of seats.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for SeatCount {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::new(
                    "seat_count",
                    format!("seat count must be a positive integer, got {value}"),
                )
            })
    }
}

impl fmt::Display for SeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed seat reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    train_id: TrainId,
    seat_count: SeatCount,
    created_at: SystemTime,
}

impl Booking {
    pub(crate) const fn from_parts(
        id: BookingId,
        user_id: UserId,
        train_id: TrainId,
        seat_count: SeatCount,
        created_at: SystemTime,
    ) -> Self {
        Self {
            id,
            user_id,
            train_id,
            seat_count,
            created_at,
        }
    }

    /// Returns the booking identifier.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the booked train.
    #[must_use]
    pub const fn train_id(&self) -> TrainId {
        self.train_id
    }

    /// Returns the number of seats reserved.
    #[must_use]
    pub const fn seat_count(&self) -> SeatCount {
        self.seat_count
    }

    /// Returns when the booking was committed.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// The user a booking belongs to, as embedded in [`BookingDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Username.
    pub username: String,
}

/// The train a booking refers to, as embedded in [`BookingDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Train identifier.
    pub id: TrainId,
    /// Train name.
    pub name: String,
    /// Source station.
    pub source_station: String,
    /// Destination station.
    pub destination_station: String,
}

/// A booking together with its user and train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    /// The booking row.
    pub booking: Booking,
    /// The owning user.
    pub user: UserSummary,
    /// The booked train.
    pub train: TrainSummary,
}

//! Train inventory types.
//!
//! A [`Train`] is a stored inventory row: a route plus a fixed seat capacity
//! and a mutable available-seat counter. [`NewTrain`] is the validated input
//! for the admin insert that creates one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::booking::SeatCount;
use crate::error::{Error, ValidationError};

/// Maximum length of a train or station name.
pub const MAX_NAME_LEN: usize = 128;

/// Store-generated identifier of a train.
///
/// # Examples
///
/// ```
/// use railbook::TrainId;
///
/// let id = TrainId::try_from(7).unwrap();
/// assert_eq!(id.value(), 7);
/// assert!(TrainId::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(i64);

impl TrainId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TrainId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::new(
                "train_id",
                format!("train id must be a positive integer, got {value}"),
            ));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A train inventory row.
///
/// The invariant `available_seats <= total_seats` holds for every value of
/// this type; rows read back from the store that violate it are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    id: TrainId,
    name: String,
    source_station: String,
    destination_station: String,
    total_seats: u32,
    available_seats: u32,
}

impl Train {
    /// Reassembles a train from stored columns.
    pub(crate) fn from_parts(
        id: TrainId,
        name: String,
        source_station: String,
        destination_station: String,
        total_seats: u32,
        available_seats: u32,
    ) -> Result<Self, ValidationError> {
        if available_seats > total_seats {
            return Err(ValidationError::new(
                "available_seats",
                format!(
                    "train {id} has {available_seats} available seats but only {total_seats} in total"
                ),
            ));
        }
        Ok(Self {
            id,
            name,
            source_station,
            destination_station,
            total_seats,
            available_seats,
        })
    }

    /// Returns the train identifier.
    #[must_use]
    pub const fn id(&self) -> TrainId {
        self.id
    }

    /// Returns the train name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source station.
    #[must_use]
    pub fn source_station(&self) -> &str {
        &self.source_station
    }

    /// Returns the destination station.
    #[must_use]
    pub fn destination_station(&self) -> &str {
        &self.destination_station
    }

    /// Returns the fixed seat capacity.
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Returns the number of seats still available.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Returns the number of seats already sold.
    #[must_use]
    pub const fn booked_seats(&self) -> u32 {
        self.total_seats - self.available_seats
    }

    /// Removes `count` seats from the available counter.
    ///
    /// Only meaningful on a train obtained from
    /// [`UnitOfWork::lock_train_for_update`](crate::database::UnitOfWork::lock_train_for_update);
    /// the change is persisted with `save_train` in the same unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSeats`] and leaves the counter untouched
    /// if fewer than `count` seats are available.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::{NewTrain, SeatCount};
    /// # use railbook::database::{Database, DatabaseConfig};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
    /// let mut train = db
    ///     .create_train(&NewTrain::new("Express", "A", "B", 2).unwrap())
    ///     .unwrap();
    ///
    /// train.take_seats(SeatCount::try_from(2).unwrap()).unwrap();
    /// assert_eq!(train.available_seats(), 0);
    /// assert!(train.take_seats(SeatCount::try_from(1).unwrap()).is_err());
    /// ```
    pub fn take_seats(&mut self, count: SeatCount) -> Result<(), Error> {
        match self.available_seats.checked_sub(count.value()) {
            Some(remaining) => {
                self.available_seats = remaining;
                Ok(())
            }
            None => Err(Error::InsufficientSeats {
                train_id: self.id,
                requested: count.value(),
                available: self.available_seats,
            }),
        }
    }
}

/// Validated input for creating a train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrain {
    name: String,
    source_station: String,
    destination_station: String,
    total_seats: u32,
}

impl NewTrain {
    /// Validates and normalizes a train definition.
    ///
    /// Names are trimmed. The available counter of the created train starts
    /// at `total_seats`.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is empty or too long, if source and
    /// destination are the same station, or if `total_seats` is not a
    /// positive integer that fits in `u32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::NewTrain;
    ///
    /// let train = NewTrain::new(" Express ", "A", "B", 100).unwrap();
    /// assert_eq!(train.name(), "Express");
    ///
    /// assert!(NewTrain::new("Express", "A", "A", 100).is_err());
    /// assert!(NewTrain::new("Express", "A", "B", 0).is_err());
    /// ```
    pub fn new(
        name: impl AsRef<str>,
        source_station: impl AsRef<str>,
        destination_station: impl AsRef<str>,
        total_seats: i64,
    ) -> Result<Self, ValidationError> {
        let name = normalize_name("name", name.as_ref())?;
        let source_station = normalize_name("source_station", source_station.as_ref())?;
        let destination_station =
            normalize_name("destination_station", destination_station.as_ref())?;

        if source_station == destination_station {
            return Err(ValidationError::new(
                "destination_station",
                "destination must differ from source",
            ));
        }

        let total_seats = u32::try_from(total_seats)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ValidationError::new(
                    "total_seats",
                    format!("total seats must be a positive integer, got {total_seats}"),
                )
            })?;

        Ok(Self {
            name,
            source_station,
            destination_station,
            total_seats,
        })
    }

    /// Returns the train name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source station.
    #[must_use]
    pub fn source_station(&self) -> &str {
        &self.source_station
    }

    /// Returns the destination station.
    #[must_use]
    pub fn destination_station(&self) -> &str {
        &self.destination_station
    }

    /// Returns the seat capacity.
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }
}

/// Trims a name and checks it is non-empty and bounded.
pub(crate) fn normalize_name(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{field} must be non-empty after trimming whitespace"),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # railbook
//!
//! A library for train seat inventory and oversell-safe reservations.
//!
//! Trains carry a fixed capacity and an available-seat counter. A
//! reservation locks the inventory store, decrements the counter and records
//! a booking in one atomic unit, so concurrent reservations, whether from
//! threads or separate processes sharing the database file, can never sell
//! more seats than exist.
//!
//! ## Core Types
//!
//! - [`Train`], [`NewTrain`] and [`TrainId`]: inventory rows
//! - [`Booking`], [`BookingDetails`] and [`SeatCount`]: committed reservations
//! - [`User`] and [`UserId`]: principals that own bookings
//! - [`Database`] and [`UnitOfWork`](database::UnitOfWork): the inventory store
//! - [`ReservationCoordinator`]: the reservation transaction
//! - [`Error`], [`ErrorKind`] and [`Result`]: error handling
//!
//! ## Examples
//!
//! ```
//! use railbook::{Database, DatabaseConfig, Error, NewTrain, ReservationCoordinator, ReserveRequest};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let mut db = Database::open(DatabaseConfig::in_data_dir(dir.path())).unwrap();
//! let user = db.create_user("asha").unwrap();
//! let train = db
//!     .create_train(&NewTrain::new("Night Mail", "Chennai", "Bengaluru", 1).unwrap())
//!     .unwrap();
//!
//! let request = ReserveRequest::new(user.id(), Some(train.id().value()), 1);
//! let mut coordinator = ReservationCoordinator::new(&mut db);
//! assert!(coordinator.reserve_seats(&request).is_ok());
//! assert!(matches!(
//!     coordinator.reserve_seats(&request),
//!     Err(Error::InsufficientSeats { .. })
//! ));
//! ```

pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod train;
pub mod user;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingDetails, BookingId, SeatCount, TrainSummary, UserSummary};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig};
pub use error::{BookingFailureReason, Error, ErrorKind, Result, ValidationError};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ReservationCoordinator, ReserveRequest};
pub use train::{NewTrain, Train, TrainId};
pub use user::{User, UserId};

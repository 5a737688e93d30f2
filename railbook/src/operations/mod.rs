//! High-level operations over the inventory store.
//!
//! The reservation transaction lives in [`reserve`]; everything else here is
//! a read or an administrative action that never contends for seat counters.
//!
//! # Examples
//!
//! ```
//! use railbook::operations::{search_routes, ReservationCoordinator, ReserveRequest};
//! use railbook::NewTrain;
//! # use railbook::database::{Database, DatabaseConfig};
//! # let dir = tempfile::tempdir().unwrap();
//! # let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
//!
//! let user = db.create_user("ravi").unwrap();
//! db.create_train(&NewTrain::new("Duronto", "Howrah", "Puri", 50).unwrap())
//!     .unwrap();
//!
//! let train = &search_routes(db.connection(), "Howrah", "Puri").unwrap()[0];
//! let request = ReserveRequest::new(user.id(), Some(train.id().value()), 4);
//! let booking = ReservationCoordinator::new(&mut db).reserve_seats(&request).unwrap();
//! assert_eq!(booking.train_id(), train.id());
//! ```

pub mod init;
pub mod lookup;
pub mod reserve;
pub mod verify;

#[cfg(test)]
mod proptests;

pub use init::{init_database, InitOptions, InitResult};
pub use lookup::{get_booking_details, search_routes};
pub use reserve::{ReservationCoordinator, ReserveRequest};
pub use verify::{verify_database, VerifyReport};

//! Property-based tests for the reservation transaction.

use crate::database::test_util::{create_test_database, create_test_train, create_test_user};
use crate::database::Database;
use crate::error::Error;
use crate::operations::{ReservationCoordinator, ReserveRequest};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // Any request sequence keeps available = total - sum(booked seats), and
    // a request succeeds exactly when it fits in what is left.
    #[test]
    fn inventory_invariant_holds(
        total in 1i64..=20,
        requests in prop::collection::vec(-2i64..=8, 1..25)
    ) {
        let mut db = create_test_database();
        let user = create_test_user(&mut db, "prop");
        let train = create_test_train(&mut db, "A", "B", total);

        let mut expected_available = total;
        for seats in requests {
            let request = ReserveRequest::new(user.id(), Some(train.id().value()), seats);
            let result = ReservationCoordinator::new(&mut db).reserve_seats(&request);

            match result {
                Ok(booking) => {
                    prop_assert!(seats > 0 && seats <= expected_available);
                    prop_assert_eq!(i64::from(booking.seat_count().value()), seats);
                    expected_available -= seats;
                }
                Err(Error::InvalidRequest { .. }) => prop_assert!(seats <= 0),
                Err(Error::InsufficientSeats { available, .. }) => {
                    prop_assert!(seats > expected_available);
                    prop_assert_eq!(i64::from(available), expected_available);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }

            let stored = Database::get_train(db.connection(), train.id()).unwrap().unwrap();
            prop_assert_eq!(i64::from(stored.available_seats()), expected_available);
        }

        let booked: i64 = Database::list_bookings_for_train(db.connection(), train.id())
            .unwrap()
            .iter()
            .map(|b| i64::from(b.seat_count().value()))
            .sum();
        prop_assert_eq!(booked, total - expected_available);
        prop_assert!(Database::audit_inventory(db.connection()).unwrap().is_empty());
    }
}

//! Multi-process reservation tests.
//!
//! Every `railbook reserve` invocation is a separate OS process with its own
//! database connection, so these tests exercise the cross-process write
//! lock rather than anything in-process.

mod common;

use common::TestEnv;
use std::process::{Child, Command, Stdio};

/// Launch `count` reserve processes at once and collect their exit codes.
fn race(env: &TestEnv, user: &str, train_id: i64, seats: i64, count: usize) -> Vec<i32> {
    let binary = assert_cmd::cargo::cargo_bin("railbook");

    let children: Vec<Child> = (0..count)
        .map(|_| {
            Command::new(&binary)
                .env_remove("RAILBOOK_DATA_DIR")
                .env_remove("RAILBOOK_MAXIMUM_LOCK_WAIT_SECONDS")
                .arg("--data-dir")
                .arg(&env.data_dir)
                .args(["--busy-timeout", "30"])
                .args(["reserve", "--user", user])
                .args(["--train", &train_id.to_string()])
                .args(["--seats", &seats.to_string()])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .expect("Failed to spawn railbook")
        })
        .collect();

    children
        .into_iter()
        .map(|child| {
            child
                .wait_with_output()
                .expect("Failed to wait for railbook")
                .status
                .code()
                .expect("railbook was killed by a signal")
        })
        .collect()
}

fn count(codes: &[i32], code: i32) -> usize {
    codes.iter().filter(|c| **c == code).count()
}

#[test]
fn test_last_seat_sold_once_across_processes() {
    let env = TestEnv::new();
    env.add_user("alice");
    let train = env.add_train("Last Seat", "Goa", "Mumbai", 1);

    let codes = race(&env, "alice", train, 1, 8);

    assert_eq!(count(&codes, 0), 1, "exit codes: {codes:?}");
    // Losers either saw the decremented counter or gave up on the lock
    assert_eq!(count(&codes, 1) + count(&codes, 2), 7, "exit codes: {codes:?}");
    assert_eq!(env.available_seats("Goa", "Mumbai", train), 0);
    env.command().arg("verify").assert().success();
}

#[test]
fn test_capacity_never_exceeded_across_processes() {
    let env = TestEnv::new();
    env.add_user("alice");
    let train = env.add_train("Rush Hour", "Goa", "Mumbai", 10);

    let codes = race(&env, "alice", train, 1, 16);

    let successes = count(&codes, 0);
    assert!(successes <= 10, "oversold: {codes:?}");
    assert_eq!(
        env.available_seats("Goa", "Mumbai", train),
        10 - i64::try_from(successes).unwrap()
    );
    env.command().arg("verify").assert().success();
}

#[test]
fn test_multi_seat_requests_across_processes() {
    let env = TestEnv::new();
    env.add_user("alice");
    let train = env.add_train("Family", "Goa", "Mumbai", 7);

    // At most three 2-seat bookings fit in 7 seats
    let codes = race(&env, "alice", train, 2, 6);

    let successes = count(&codes, 0);
    assert!(successes <= 3, "oversold: {codes:?}");
    let available = env.available_seats("Goa", "Mumbai", train);
    assert_eq!(available, 7 - 2 * i64::try_from(successes).unwrap());
    assert!(available >= 0);
    env.command().arg("verify").assert().success();
}

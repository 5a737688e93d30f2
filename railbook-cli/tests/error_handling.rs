//! Integration tests for error handling and exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Business rejection (insufficient seats, failed verify)
//! - 2: Booking failed / lock wait expired (retryable)
//! - 3: No data directory found
//! - 4: Invalid arguments or invalid request
//! - 5: I/O error
//! - 6: Other library error
//! - 7: Configuration error
//! - 8: Not found

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;
use std::time::{Duration, Instant};

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.command().args(["add-user", "--username", "alice"]).assert().code(0);
    env.command().arg("verify").assert().code(0);
}

#[test]
fn test_unknown_subcommand_is_invalid_arguments() {
    let env = TestEnv::new();
    env.command().arg("oversell").assert().code(4);
}

#[test]
fn test_missing_required_flag_is_invalid_arguments() {
    let env = TestEnv::new();
    env.command().args(["add-train", "--name", "X"]).assert().code(4);
}

#[test]
fn test_non_numeric_seats_is_invalid_arguments() {
    let env = TestEnv::new();
    env.command()
        .args(["reserve", "--user", "alice", "--train", "1", "--seats", "two"])
        .assert()
        .code(4);
}

#[test]
fn test_help_and_version_succeed() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reserve"));
    env.command_bare().arg("--version").assert().success();
}

#[test]
fn test_add_train_validation_errors() {
    let env = TestEnv::new();

    env.command()
        .args(["add-train", "--name", "Loop", "--source", "Goa"])
        .args(["--destination", "Goa", "--seats", "5"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("destination"));

    env.command()
        .args(["add-train", "--name", "Empty", "--source", "Goa"])
        .args(["--destination", "Pune", "--seats", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("total_seats"));

    // Rejected before the store is opened
    assert!(!env.data_dir.exists());
}

#[test]
fn test_duplicate_username_is_invalid() {
    let env = TestEnv::new();
    env.add_user("alice");

    env.command()
        .args(["add-user", "--username", "alice"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("username"));
}

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();

    env.command()
        .arg("--disable-autoinit")
        .args(["trains", "--source", "A", "--destination", "B"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("railbook init"));

    assert!(!env.db_path().exists());
}

#[test]
fn test_disable_autoinit_from_environment() {
    let env = TestEnv::new();

    env.command()
        .env("RAILBOOK_DISABLE_AUTOINIT", "true")
        .arg("verify")
        .assert()
        .code(3);
}

#[test]
fn test_disable_autoinit_from_config() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "disable_autoinit: true\n").unwrap();

    env.command().arg("verify").assert().code(3);
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "maximum_lock_wait_seconds: [\n").unwrap();

    env.command()
        .arg("verify")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "max_seats: 10\n").unwrap();

    env.command().arg("verify").assert().code(7);
}

#[test]
fn test_out_of_range_lock_wait_is_config_error() {
    let env = TestEnv::new();

    env.command()
        .env("RAILBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "0")
        .arg("verify")
        .assert()
        .code(7);
}

#[test]
fn test_busy_timeout_out_of_range_is_invalid_arguments() {
    let env = TestEnv::new();
    env.add_user("alice");
    let train = env.add_train("Coastal", "Goa", "Mumbai", 5);

    for value in ["0", "3601", "3000000"] {
        env.reserve("alice", train, 1)
            .args(["--busy-timeout", value])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("--busy-timeout"));
    }

    env.reserve("alice", train, 1)
        .env("RAILBOOK_BUSY_TIMEOUT", "0")
        .assert()
        .code(4);

    env.reserve("alice", train, 1)
        .args(["--busy-timeout", "3600"])
        .assert()
        .success();
    assert_eq!(env.available_seats("Goa", "Mumbai", train), 4);
}

#[test]
fn test_lock_timeout_exit_code() {
    let env = TestEnv::new();
    env.add_user("alice");
    let train = env.add_train("Coastal", "Goa", "Mumbai", 5);

    // Hold the database write lock from outside the CLI
    let holder = rusqlite::Connection::open(env.db_path()).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE").unwrap();

    let started = Instant::now();
    env.reserve("alice", train, 1)
        .arg("--busy-timeout")
        .arg("1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("booking failed"))
        .stderr(predicate::str::contains("safe to retry"))
        .stderr(predicate::str::contains("database is locked").not());
    assert!(started.elapsed() < Duration::from_secs(30));

    holder.execute_batch("ROLLBACK").unwrap();
    assert_eq!(env.available_seats("Goa", "Mumbai", train), 5);
}

#[test]
fn test_reads_do_not_wait_for_writer() {
    let env = TestEnv::new();
    let train = env.add_train("Coastal", "Goa", "Mumbai", 5);

    let holder = rusqlite::Connection::open(env.db_path()).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE").unwrap();
    holder
        .execute(
            "UPDATE trains SET available_seats = 0 WHERE id = ?1",
            [train],
        )
        .unwrap();

    // Uncommitted decrement is invisible to the search
    assert_eq!(env.available_seats("Goa", "Mumbai", train), 5);

    holder.execute_batch("ROLLBACK").unwrap();
}

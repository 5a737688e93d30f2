//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns an isolated temporary data directory, and every
//! command it builds has the `RAILBOOK_*` environment cleared so the host
//! environment cannot leak into a test.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RAILBOOK_ENV_VARS: [&str; 7] = [
    "RAILBOOK_DATA_DIR",
    "RAILBOOK_BUSY_TIMEOUT",
    "RAILBOOK_DISABLE_AUTOINIT",
    "RAILBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "RAILBOOK_OUTPUT_FORMAT",
    "RAILBOOK_LOG_MODE",
    "RAILBOOK_USER",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the railbook data directory (not created until first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("railbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("railbook").expect("Failed to find railbook binary");
        for var in RAILBOOK_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("railbook.db")
    }

    /// Register a user and return its id.
    pub fn add_user(&self, username: &str) -> i64 {
        let output = self
            .command()
            .args(["add-user", "--username", username])
            .output()
            .expect("Failed to run add-user");
        assert!(
            output.status.success(),
            "add-user failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Add a train and return its id.
    pub fn add_train(&self, name: &str, source: &str, destination: &str, seats: u32) -> i64 {
        let output = self
            .command()
            .args(["add-train", "--name", name, "--source", source])
            .args(["--destination", destination])
            .args(["--seats", &seats.to_string()])
            .output()
            .expect("Failed to run add-train");
        assert!(
            output.status.success(),
            "add-train failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Build a `reserve` command for the given user, train and seat count.
    pub fn reserve(&self, user: &str, train_id: i64, seats: i64) -> Command {
        let mut cmd = self.command();
        cmd.args(["reserve", "--user", user])
            .args(["--train", &train_id.to_string()])
            .args(["--seats", &seats.to_string()]);
        cmd
    }

    /// Reserve seats, asserting success, and return the booking id.
    pub fn reserve_ok(&self, user: &str, train_id: i64, seats: i64) -> i64 {
        let output = self
            .reserve(user, train_id, seats)
            .output()
            .expect("Failed to run reserve");
        assert!(
            output.status.success(),
            "reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Route search as JSON.
    pub fn trains_json(&self, source: &str, destination: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["trains", "--source", source, "--destination", destination])
            .args(["--format", "json"])
            .output()
            .expect("Failed to run trains");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("trains output is not JSON")
    }

    /// Available seats of a train, read through the route search.
    pub fn available_seats(&self, source: &str, destination: &str, train_id: i64) -> i64 {
        self.trains_json(source, destination)
            .as_array()
            .expect("expected a JSON array")
            .iter()
            .find(|t| t["id"] == train_id)
            .and_then(|t| t["available_seats"].as_i64())
            .expect("train not in search results")
    }
}

/// Parse a single id printed on stdout.
pub fn parse_id(output: &str) -> i64 {
    output
        .trim()
        .parse()
        .unwrap_or_else(|_| panic!("Output is not an id: {output:?}"))
}

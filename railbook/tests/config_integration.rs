//! Integration tests for layered configuration.
//!
//! Tests that modify environment variables are marked with `#[serial]`.

use std::env;
use std::fs;
use std::time::Duration;

use railbook::config::{Config, ConfigBuilder, OutputFormat};
use railbook::error::Error;
use railbook::operations::{init_database, InitOptions};
use serial_test::serial;
use tempfile::TempDir;

const ENV_KEYS: [&str; 4] = [
    "RAILBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "RAILBOOK_DISABLE_AUTOINIT",
    "RAILBOOK_OUTPUT_FORMAT",
    "RAILBOOK_DATA_DIR",
];

/// RAII guard that clears railbook variables and restores them on drop.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn clean() -> Self {
        let saved = ENV_KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in ENV_KEYS {
            env::remove_var(key);
        }
        Self { saved }
    }

    fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_init_template_then_build() {
    let _guard = EnvGuard::clean();
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("railbook");

    init_database(&InitOptions::new(data_dir.clone()).with_create_config(true)).unwrap();

    let config = ConfigBuilder::new().with_data_dir(&data_dir).build().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.lock_wait(), Duration::from_secs(5));
}

#[test]
#[serial]
fn test_file_then_env_then_override() {
    let guard = EnvGuard::clean();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.yaml"),
        "maximum_lock_wait_seconds: 20\ndisable_autoinit: true\noutput_format: tsv\n",
    )
    .unwrap();

    let from_file = ConfigBuilder::new().with_data_dir(temp.path()).build().unwrap();
    assert_eq!(from_file.lock_wait(), Duration::from_secs(20));
    assert!(from_file.autoinit_disabled());
    assert_eq!(from_file.output_format(), OutputFormat::Tsv);

    guard.set("RAILBOOK_OUTPUT_FORMAT", "json");
    guard.set("RAILBOOK_DISABLE_AUTOINIT", "false");
    let from_env = ConfigBuilder::new().with_data_dir(temp.path()).build().unwrap();
    assert_eq!(from_env.output_format(), OutputFormat::Json);
    assert!(!from_env.autoinit_disabled());
    assert_eq!(from_env.lock_wait(), Duration::from_secs(20));

    let overridden = ConfigBuilder::new()
        .with_data_dir(temp.path())
        .with_config(Config {
            output_format: Some(OutputFormat::Csv),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(overridden.output_format(), OutputFormat::Csv);
}

#[test]
#[serial]
fn test_data_dir_from_environment() {
    let guard = EnvGuard::clean();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "maximum_lock_wait_seconds: 2\n").unwrap();
    guard.set("RAILBOOK_DATA_DIR", temp.path().to_str().unwrap());

    let config = ConfigBuilder::new().build().unwrap();
    assert_eq!(config.maximum_lock_wait_seconds, Some(2));
}

#[test]
#[serial]
fn test_invalid_sources_are_reported() {
    let guard = EnvGuard::clean();
    let temp = TempDir::new().unwrap();

    fs::write(temp.path().join("config.yaml"), "port_range: 10\n").unwrap();
    assert!(matches!(
        ConfigBuilder::new().with_data_dir(temp.path()).build(),
        Err(Error::Configuration(_))
    ));

    fs::write(temp.path().join("config.yaml"), "maximum_lock_wait_seconds: 0\n").unwrap();
    assert!(matches!(
        ConfigBuilder::new().with_data_dir(temp.path()).build(),
        Err(Error::Validation { .. })
    ));

    fs::remove_file(temp.path().join("config.yaml")).unwrap();
    guard.set("RAILBOOK_DISABLE_AUTOINIT", "perhaps");
    assert!(matches!(
        ConfigBuilder::new().with_data_dir(temp.path()).build(),
        Err(Error::Validation { .. })
    ));
}

//! Configuration system for railbook.
//!
//! Configuration is merged from several sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RAILBOOK_*`)
//! 3. The data directory's `config.yaml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use railbook::config::ConfigBuilder;
//! use std::time::Duration;
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let config = ConfigBuilder::new()
//!     .with_data_dir(dir.path())
//!     .skip_env()
//!     .build()
//!     .unwrap();
//! assert_eq!(config.lock_wait(), Duration::from_secs(5));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, MAX_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;

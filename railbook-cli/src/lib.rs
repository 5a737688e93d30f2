//! Library exports for railbook-cli.
//!
//! This module exports the CLI structure for benchmarks and documentation
//! tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;

//! Argument grammar of the `railbook` binary.

use crate::commands::{
    AddTrainCommand, AddUserCommand, BookingCommand, CompletionsCommand, InitCommand,
    ReserveCommand, TrainsCommand, VerifyCommand,
};
use clap::{Parser, Subcommand};
use railbook::config::MAX_LOCK_WAIT_SECONDS;
use std::path::PathBuf;

/// Command-line tool for train seat inventory and reservations.
#[derive(Parser)]
#[command(name = "railbook")]
#[command(version, about = "Reserve train seats without overselling", long_about = None)]
pub struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print only results and errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding railbook.db and config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "RAILBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seconds to wait for the inventory lock before giving up
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "RAILBOOK_BUSY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..=MAX_LOCK_WAIT_SECONDS)
    )]
    pub busy_timeout: Option<u64>,

    /// Fail instead of creating a missing database
    #[arg(long, global = true, env = "RAILBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register a user that bookings can reference
    AddUser(AddUserCommand),

    /// Add a train to the inventory
    AddTrain(AddTrainCommand),

    /// Search trains by route
    Trains(TrainsCommand),

    /// Reserve seats on a train
    Reserve(ReserveCommand),

    /// Show a booking with its user and train
    Booking(BookingCommand),

    /// Check database integrity and seat accounting
    Verify(VerifyCommand),

    /// Print a shell completion script
    Completions(CompletionsCommand),
}

//! Main entry point for the railbook CLI.
//!
//! This is the command-line interface for the railbook seat reservation
//! system. Each invocation is one worker with its own database connection:
//! - `reserve`: Reserve seats on a train
//! - `trains`: Search trains by route
//! - `booking`: Show a booking
//! - `add-train` / `add-user`: Admin inserts
//! - `verify`: Check seat accounting

mod cli;
mod commands;
mod error;
mod utils;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

/// Exit code for malformed command lines (clap defaults to 2).
const USAGE_EXIT_CODE: i32 = 4;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(USAGE_EXIT_CODE);
            }
        },
    };

    if let Err(e) = railbook::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: failed to install logger: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddUser(cmd) => cmd.execute(&global),
        cli::Command::AddTrain(cmd) => cmd.execute(&global),
        cli::Command::Trains(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Booking(cmd) => cmd.execute(&global),
        cli::Command::Verify(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

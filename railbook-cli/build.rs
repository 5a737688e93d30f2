//! Build script for railbook-cli.
//!
//! Generates the `railbook.1` man page into `OUT_DIR/man` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .help("Output format")
        .value_parser(["table", "json", "csv", "tsv"])
}

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs and the argument structs in src/commands/.
fn build_cli() -> Command {
    Command::new("railbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reserve train seats without overselling")
        .long_about(
            "Manage train seat inventory and reserve seats. Concurrent reservations \
             for the same train are serialized on the database write lock, so a train \
             is never sold beyond its capacity.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Print debug diagnostics to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Print only results and errors")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory holding railbook.db and config.yaml")
                .value_name("PATH")
                .global(true)
                .env("RAILBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Seconds to wait for the inventory lock before giving up")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..=3600))
                .global(true)
                .env("RAILBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Fail instead of creating a missing database")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("RAILBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .arg(Arg::new("dir").long("dir").value_name("PATH"))
                .arg(Arg::new("overwrite").long("overwrite").action(ArgAction::SetTrue))
                .arg(Arg::new("with-config").long("with-config").action(ArgAction::SetTrue))
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue)),
            Command::new("add-user")
                .about("Register a user that bookings can reference")
                .arg(Arg::new("username").long("username").required(true)),
            Command::new("add-train")
                .about("Add a train to the inventory")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("source").long("source").required(true))
                .arg(Arg::new("destination").long("destination").required(true))
                .arg(Arg::new("seats").long("seats").required(true)),
            Command::new("trains")
                .about("Search trains by route")
                .arg(Arg::new("source").long("source").required(true))
                .arg(Arg::new("destination").long("destination").required(true))
                .arg(format_arg()),
            Command::new("reserve")
                .about("Reserve seats on a train")
                .long_about(
                    "Reserve seats on a train. Prints the booking id. Exits 1 when the \
                     train has too few seats left and 2 when the inventory lock could \
                     not be acquired in time (safe to retry).",
                )
                .arg(
                    Arg::new("user")
                        .long("user")
                        .required(true)
                        .env("RAILBOOK_USER"),
                )
                .arg(Arg::new("train").long("train"))
                .arg(Arg::new("seats").long("seats").default_value("1"))
                .arg(format_arg()),
            Command::new("booking")
                .about("Show a booking with its user and train")
                .arg(Arg::new("id").required(true))
                .arg(format_arg()),
            Command::new("verify")
                .about("Check database integrity and seat accounting")
                .arg(format_arg()),
            Command::new("completions")
                .about("Print a shell completion script")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("railbook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}

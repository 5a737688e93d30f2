//! Reserve command implementation.
//!
//! This module implements the `reserve` command, the reservation entry
//! point. Each invocation is an independent worker with its own store
//! connection; concurrent invocations against the same train serialize on
//! the database write lock.

use crate::error::CliError;
use crate::utils::{
    csv_error, format_timestamp_rfc3339, json_error, load_configuration, open_database,
    output_format, GlobalOptions,
};
use clap::Args;
use railbook::config::OutputFormat;
use railbook::{Booking, Database, ReservationCoordinator, ReserveRequest};
use std::io::Write;

const COLUMN_HEADERS: [&str; 6] = [
    "id",
    "user_id",
    "train_id",
    "seat_count",
    "created_at",
    "status",
];

/// Reserve seats on a train.
#[derive(Args)]
pub struct ReserveCommand {
    /// Username of the authenticated principal making the booking
    #[arg(long, value_name = "USERNAME", env = "RAILBOOK_USER")]
    pub user: String,

    /// Train identifier
    #[arg(long, value_name = "ID", allow_negative_numbers = true)]
    pub train: Option<i64>,

    /// Number of seats to reserve
    #[arg(long, value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub seats: i64,

    /// Output format (default from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    ///
    /// In table format only the booking id is printed so scripts can capture it.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let user = Database::get_user_by_username(db.connection(), &self.user)?.ok_or_else(
            || railbook::Error::NotFound {
                resource: format!("user '{}'", self.user.trim()),
            },
        )?;

        let request = ReserveRequest::new(user.id(), self.train, self.seats);
        let booking = ReservationCoordinator::new(&mut db).reserve_seats(&request)?;

        match output_format(self.format, &config) {
            OutputFormat::Table => println!("{}", booking.id()),
            OutputFormat::Json => print_json(&booking)?,
            OutputFormat::Csv => print_delimited(&booking, b',')?,
            OutputFormat::Tsv => print_delimited(&booking, b'\t')?,
        }

        Ok(())
    }
}

fn print_json(booking: &Booking) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let value = serde_json::json!({
        "id": booking.id(),
        "user_id": booking.user_id(),
        "train_id": booking.train_id(),
        "seat_count": booking.seat_count(),
        "created_at": format_timestamp_rfc3339(booking.created_at()),
        "status": "created",
    });

    serde_json::to_writer_pretty(&mut handle, &value).map_err(json_error)?;
    writeln!(handle)?;
    Ok(())
}

fn print_delimited(booking: &Booking, delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(stdout.lock());

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    writer
        .write_record([
            booking.id().to_string(),
            booking.user_id().to_string(),
            booking.train_id().to_string(),
            booking.seat_count().to_string(),
            format_timestamp_rfc3339(booking.created_at()),
            "created".to_string(),
        ])
        .map_err(csv_error)?;
    writer.flush()?;
    Ok(())
}

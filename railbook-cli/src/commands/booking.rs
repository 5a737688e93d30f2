//! Booking command implementation.
//!
//! Looks up one booking together with the user who made it and the train it
//! reserves seats on.

use crate::error::CliError;
use crate::utils::{
    csv_error, format_timestamp, format_timestamp_rfc3339, json_error, load_configuration,
    open_database, output_format, GlobalOptions,
};
use clap::Args;
use railbook::config::OutputFormat;
use railbook::operations::get_booking_details;
use railbook::BookingDetails;
use std::io::Write;

const COLUMN_HEADERS: [&str; 9] = [
    "id",
    "user_id",
    "username",
    "train_id",
    "train_name",
    "source",
    "destination",
    "seat_count",
    "created_at",
];

/// Show a booking.
#[derive(Args)]
pub struct BookingCommand {
    /// Booking identifier
    #[arg(value_name = "ID", allow_negative_numbers = true)]
    pub id: i64,

    /// Output format (default from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl BookingCommand {
    /// Execute the booking command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let details = get_booking_details(db.connection(), self.id)?;

        match output_format(self.format, &config) {
            OutputFormat::Table => print_table(&details)?,
            OutputFormat::Json => print_json(&details)?,
            OutputFormat::Csv => print_delimited(&details, b',')?,
            OutputFormat::Tsv => print_delimited(&details, b'\t')?,
        }

        Ok(())
    }
}

fn print_table(details: &BookingDetails) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let booking = &details.booking;

    writeln!(handle, "Booking:     {}", booking.id())?;
    writeln!(
        handle,
        "User:        {} ({})",
        details.user.username, details.user.id
    )?;
    writeln!(
        handle,
        "Train:       {} ({})",
        details.train.name, details.train.id
    )?;
    writeln!(
        handle,
        "Route:       {} -> {}",
        details.train.source_station, details.train.destination_station
    )?;
    writeln!(handle, "Seats:       {}", booking.seat_count())?;
    writeln!(
        handle,
        "Created:     {}",
        format_timestamp(booking.created_at())
    )?;

    Ok(())
}

fn print_json(details: &BookingDetails) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let booking = &details.booking;

    let value = serde_json::json!({
        "id": booking.id(),
        "seat_count": booking.seat_count(),
        "created_at": format_timestamp_rfc3339(booking.created_at()),
        "user": {
            "id": details.user.id,
            "username": details.user.username,
        },
        "train": {
            "id": details.train.id,
            "name": details.train.name,
            "source": details.train.source_station,
            "destination": details.train.destination_station,
        },
    });

    serde_json::to_writer_pretty(&mut handle, &value).map_err(json_error)?;
    writeln!(handle)?;
    Ok(())
}

fn print_delimited(details: &BookingDetails, delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(stdout.lock());
    let booking = &details.booking;

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    writer
        .write_record([
            booking.id().to_string(),
            details.user.id.to_string(),
            details.user.username.clone(),
            details.train.id.to_string(),
            details.train.name.clone(),
            details.train.source_station.clone(),
            details.train.destination_station.clone(),
            booking.seat_count().to_string(),
            format_timestamp_rfc3339(booking.created_at()),
        ])
        .map_err(csv_error)?;
    writer.flush()?;
    Ok(())
}

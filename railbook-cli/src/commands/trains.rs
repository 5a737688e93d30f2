//! Trains command implementation.
//!
//! This module implements the `trains` command, a non-locking route search
//! that prints matching trains in various formats (table, JSON, CSV, TSV).
//! An empty result is a successful search.

use crate::error::CliError;
use crate::utils::{
    csv_error, json_error, load_configuration, open_database, output_format, GlobalOptions,
};
use clap::Args;
use railbook::config::OutputFormat;
use railbook::operations::search_routes;
use railbook::Train;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = [
    "id",
    "name",
    "source",
    "destination",
    "total_seats",
    "available_seats",
];

/// Search trains by route.
#[derive(Args)]
pub struct TrainsCommand {
    /// Source station
    #[arg(long, value_name = "STATION")]
    pub source: String,

    /// Destination station
    #[arg(long, value_name = "STATION")]
    pub destination: String,

    /// Output format (default from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl TrainsCommand {
    /// Execute the trains command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let trains = search_routes(db.connection(), &self.source, &self.destination)?;

        match output_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&trains)?,
            OutputFormat::Json => format_as_json(&trains)?,
            OutputFormat::Csv => format_as_delimited(&trains, b',')?,
            OutputFormat::Tsv => format_as_delimited(&trains, b'\t')?,
        }

        Ok(())
    }
}

fn train_record(train: &Train) -> [String; 6] {
    [
        train.id().to_string(),
        train.name().to_string(),
        train.source_station().to_string(),
        train.destination_station().to_string(),
        train.total_seats().to_string(),
        train.available_seats().to_string(),
    ]
}

/// Format trains as a human-readable table.
fn format_as_table(trains: &[Train]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for train in trains {
        writeln!(handle, "{}", train_record(train).join("\t"))?;
    }

    Ok(())
}

/// Format trains as a JSON array.
fn format_as_json(trains: &[Train]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = trains
        .iter()
        .map(|t| {
            serde_json::json!({
                "id": t.id(),
                "name": t.name(),
                "source": t.source_station(),
                "destination": t.destination_station(),
                "total_seats": t.total_seats(),
                "available_seats": t.available_seats(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

/// Format trains as delimited output (CSV or TSV).
fn format_as_delimited(trains: &[Train], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for train in trains {
        writer.write_record(train_record(train)).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}

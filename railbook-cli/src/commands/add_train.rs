//! Add-train command implementation.
//!
//! This is the admin insert: the new train starts with every seat available.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use railbook::NewTrain;

/// Add a train to the inventory.
#[derive(Args)]
pub struct AddTrainCommand {
    /// Train name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Source station
    #[arg(long, value_name = "STATION")]
    pub source: String,

    /// Destination station
    #[arg(long, value_name = "STATION")]
    pub destination: String,

    /// Total seat capacity
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub seats: i64,
}

impl AddTrainCommand {
    /// Execute the add-train command. Prints the new train id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Validate before touching the store so bad input never creates a data dir
        let new_train = NewTrain::new(&self.name, &self.source, &self.destination, self.seats)
            .map_err(railbook::Error::from)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let train = db.create_train(&new_train)?;

        if !global.quiet {
            eprintln!(
                "Added {} ({} -> {}, {} seats)",
                train.name(),
                train.source_station(),
                train.destination_station(),
                train.total_seats()
            );
        }
        println!("{}", train.id());
        Ok(())
    }
}

//! Add-user command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// Register a user.
///
/// Stands in for an external registration service: the user row only
/// exists so bookings have a principal to reference.
#[derive(Args)]
pub struct AddUserCommand {
    /// Unique username
    #[arg(long, value_name = "NAME")]
    pub username: String,
}

impl AddUserCommand {
    /// Execute the add-user command. Prints the new user id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let user = db.create_user(&self.username)?;

        println!("{}", user.id());
        Ok(())
    }
}

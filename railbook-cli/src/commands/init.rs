//! `railbook init`: prepare a data directory explicitly.

use crate::error::CliError;
use crate::utils::{data_dir, GlobalOptions};
use clap::Parser;
use railbook::config::CONFIG_FILE_NAME;
use railbook::database::DATABASE_FILE_NAME;
use railbook::operations::{init_database, InitOptions};
use std::path::{Path, PathBuf};

/// Initialize railbook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize railbook data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "dir", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Overwrite existing database (destroys all trains and bookings)
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Runs regardless of `--disable-autoinit`, since this is the explicit
    /// way to create the database.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let target = self.dir.clone().map_or_else(|| data_dir(global), Ok)?;

        if self.dry_run {
            self.print_plan(&target);
            return Ok(());
        }

        let options = InitOptions::new(target)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);

        // An existing database is a usage mistake, not a store failure
        let result = init_database(&options).map_err(|e| match e {
            railbook::Error::Validation { field, message } if field == "database" => {
                CliError::InvalidArguments(message)
            }
            other => other.into(),
        })?;

        if !global.quiet {
            let mut lines = vec![format!(
                "Initialized railbook in: {}",
                result.data_dir.display()
            )];
            if result.data_dir_created {
                lines.push("  - Created data directory".into());
            }
            lines.push(if self.overwrite {
                "  - Recreated database".into()
            } else {
                "  - Created database".into()
            });
            if result.config_created {
                lines.push("  - Created default configuration file".into());
            } else if self.with_config {
                lines.push("  - Configuration file already exists (not overwritten)".into());
            }
            println!("{}", lines.join("\n"));
        }

        Ok(())
    }

    fn print_plan(&self, dir: &Path) {
        let db_path = dir.join(DATABASE_FILE_NAME);
        let config_path = dir.join(CONFIG_FILE_NAME);

        println!("Dry-run mode: nothing will be written\n");
        println!("Would initialize railbook in: {}", dir.display());
        if !dir.exists() {
            println!("  - Create data directory: {}", dir.display());
        }
        match (db_path.exists(), self.overwrite) {
            (false, _) => println!("  - Create database: {}", db_path.display()),
            (true, true) => println!("  - Replace database: {}", db_path.display()),
            (true, false) => println!(
                "  - Refuse: database already exists at {} (needs --overwrite)",
                db_path.display()
            ),
        }
        if self.with_config {
            if config_path.exists() {
                println!("  - Keep existing configuration: {}", config_path.display());
            } else {
                println!("  - Create configuration file: {}", config_path.display());
            }
        }
    }
}

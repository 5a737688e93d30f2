//! Verify command implementation.
//!
//! Runs `PRAGMA integrity_check` and the seat accounting audit. Exits with
//! code 1 if either finds a problem.

use crate::error::CliError;
use crate::utils::{json_error, load_configuration, open_database, GlobalOptions};
use clap::Args;
use railbook::config::OutputFormat;
use railbook::operations::{verify_database, VerifyReport};
use std::io::Write;

/// Check database integrity and seat accounting.
#[derive(Args)]
pub struct VerifyCommand {
    /// Output format (table or json)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl VerifyCommand {
    /// Execute the verify command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let report = verify_database(&db)?;

        match self.format {
            Some(OutputFormat::Json) => print_json(&report)?,
            _ => print_summary(&report, global.quiet)?,
        }

        if report.is_healthy() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "Verification failed: {} train(s) with inconsistent seat counts{}",
                report.discrepancies.len(),
                if report.integrity_ok {
                    ""
                } else {
                    ", integrity check failed"
                }
            )))
        }
    }
}

fn print_summary(report: &VerifyReport, quiet: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if !report.integrity_ok {
        writeln!(
            handle,
            "Integrity check: FAILED ({})",
            report.integrity_details.as_deref().unwrap_or("no details")
        )?;
    } else if !quiet {
        writeln!(handle, "Integrity check: ok")?;
    }

    for d in &report.discrepancies {
        writeln!(
            handle,
            "Train {}: {} available, {} total, {} booked (expected {} available)",
            d.train_id,
            d.available_seats,
            d.total_seats,
            d.booked_seats,
            d.expected_available()
        )?;
    }

    if !quiet {
        writeln!(
            handle,
            "Checked {} train(s), {} inconsistent",
            report.trains_checked,
            report.discrepancies.len()
        )?;
    }

    Ok(())
}

fn print_json(report: &VerifyReport) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, report).map_err(json_error)?;
    writeln!(handle)?;
    Ok(())
}

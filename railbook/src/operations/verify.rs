//! Store verification: SQLite integrity plus the inventory invariant.

use serde::Serialize;

use crate::database::{Database, InventoryDiscrepancy};
use crate::error::{Error, Result};

/// Outcome of [`verify_database`].
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    /// Whether `PRAGMA integrity_check` returned `ok`.
    pub integrity_ok: bool,
    /// The integrity failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_details: Option<String>,
    /// Number of trains audited.
    pub trains_checked: usize,
    /// Trains whose counter disagrees with their bookings.
    pub discrepancies: Vec<InventoryDiscrepancy>,
}

impl VerifyReport {
    /// Whether every check passed.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.integrity_ok && self.discrepancies.is_empty()
    }
}

/// Runs every store check and collects the results.
///
/// A failed check is reported in the [`VerifyReport`], not as an error.
///
/// # Errors
///
/// Returns an error only if a check could not be run at all.
pub fn verify_database(db: &Database) -> Result<VerifyReport> {
    let (integrity_ok, integrity_details) = match db.verify_integrity() {
        Ok(()) => (true, None),
        Err(Error::DatabaseCorruption { details }) => (false, Some(details)),
        Err(e) => return Err(e),
    };

    let trains_checked = Database::list_trains(db.connection())?.len();
    let discrepancies = Database::audit_inventory(db.connection())?;

    for d in &discrepancies {
        log::warn!(
            "train {} has {} available seats, bookings imply {}",
            d.train_id,
            d.available_seats,
            d.expected_available()
        );
    }

    Ok(VerifyReport {
        integrity_ok,
        integrity_details,
        trains_checked,
        discrepancies,
    })
}

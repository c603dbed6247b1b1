//! Offline pricing of a booking record stored as JSON.

use std::fs;
use std::path::Path;

use booking_core::{
    price_line, validate_record, PriceEstimate, PriceTable, SystemClock, ValidationContext,
};
use booking_domain::BookingRecord;
use tracing::debug;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;

pub fn read_record(path: &Path) -> Result<BookingRecord, CommandError> {
    let data = fs::read_to_string(path).map_err(|err| {
        CommandError::Message(format!("cannot read `{}`: {err}", path.display()))
    })?;
    let record = serde_json::from_str(&data)?;
    debug!(path = %path.display(), "booking record loaded");
    Ok(record)
}

/// Prints the summary and the itemised estimate. Validation problems are
/// listed but do not prevent pricing.
pub fn quote_file(path: &Path, pricing: &PriceTable) -> CommandResult {
    let record = read_record(path)?;
    let estimate = pricing.estimate(&record);

    output::section("Booking");
    output::rows(&booking_core::summary_rows(&record));
    output::section("Estimate");
    output::rows(&estimate_rows(&estimate));

    let errors = validate_record(&record, &ValidationContext::from_clock(&SystemClock));
    if !errors.is_empty() {
        output::warning(format!(
            "This booking cannot be submitted yet ({} problem(s)):",
            errors.len()
        ));
        for (field, message) in errors.iter() {
            output::warning(format!("{}: {message}", field.label()));
        }
    }
    Ok(())
}

pub fn estimate_rows(estimate: &PriceEstimate) -> Vec<(&'static str, String)> {
    let amount = |value: u32| format!("{value} {}", estimate.currency);
    vec![
        ("Base fare", amount(estimate.base)),
        ("Extra passengers", amount(estimate.passengers)),
        ("Luggage", amount(estimate.luggage)),
        ("Equipment", amount(estimate.equipment)),
        ("Total", price_line(estimate)),
    ]
}

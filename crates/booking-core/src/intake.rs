//! Minimal checks the intake endpoints apply before doing any work.
//!
//! These are deliberately looser than the wizard's step validators: the
//! endpoints only refuse requests they cannot act on at all.

use booking_domain::{BookingRecord, ContactMessage};
use thiserror::Error;

use crate::validation::is_plausible_email;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Passenger email is required")]
    MissingEmail,
    #[error("Collection and destination points are required")]
    MissingJourneyPoints,
    #[error("Name, email and message are required")]
    MissingContactFields,
    #[error("Please provide a valid email address")]
    InvalidEmail,
}

pub fn check_booking_intake(record: &BookingRecord) -> Result<(), IntakeError> {
    if record.passenger.email.trim().is_empty() {
        return Err(IntakeError::MissingEmail);
    }
    if !record.journey.has_points() {
        return Err(IntakeError::MissingJourneyPoints);
    }
    Ok(())
}

pub fn check_contact_intake(message: &ContactMessage) -> Result<(), IntakeError> {
    let fields = [&message.name, &message.email, &message.message];
    if fields.iter().any(|value| value.trim().is_empty()) {
        return Err(IntakeError::MissingContactFields);
    }
    if !is_plausible_email(message.email.trim()) {
        return Err(IntakeError::InvalidEmail);
    }
    Ok(())
}

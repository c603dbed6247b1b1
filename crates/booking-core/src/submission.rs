//! Contract between the wizard and the booking intake endpoint.

use booking_domain::BookingRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::QuoteId;

/// Response envelope of `POST /api/booking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub success: bool,
    pub quote_id: QuoteId,
    pub estimated_price: u32,
    pub currency: String,
    pub email_sent: bool,
    pub message: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("could not reach the booking service: {0}")]
    Transport(String),
    #[error("the booking service timed out")]
    Timeout,
    #[error("booking rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from the booking service: {0}")]
    InvalidResponse(String),
}

/// Sends a completed booking to the intake endpoint. Called at most once per
/// submit attempt.
pub trait BookingSubmitter {
    fn submit(&mut self, record: &BookingRecord) -> Result<BookingReceipt, SubmitError>;
}

impl<F> BookingSubmitter for F
where
    F: FnMut(&BookingRecord) -> Result<BookingReceipt, SubmitError>,
{
    fn submit(&mut self, record: &BookingRecord) -> Result<BookingReceipt, SubmitError> {
        self(record)
    }
}

//! Request and response bodies that are not domain types.

use serde::{Deserialize, Serialize};

pub use booking_core::BookingReceipt as BookingResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinksQuery {
    pub category: Option<String>,
}

impl LinksQuery {
    /// Trimmed category, `None` when absent or blank.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

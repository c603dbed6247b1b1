//! Read-only marketing content served from the CMS.

use serde::{Deserialize, Serialize};

/// Customer quote shown next to the booking form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub name: String,
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl Testimonial {
    pub fn new(name: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quote: quote.into(),
            location: None,
            rating: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating.min(5));
        self
    }
}

/// Categorised outbound link (resorts, partners, travel info).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub title: String,
    pub url: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

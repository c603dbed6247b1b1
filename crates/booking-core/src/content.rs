//! Best-effort loading of CMS-backed content with built-in defaults.

use booking_domain::{Link, Testimonial};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("content unavailable: {0}")]
pub struct ContentError(pub String);

/// Distinguishes data that was actually fetched from the built-in defaults
/// shown when fetching failed or came back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Fallback(T),
}

impl<T> FetchOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback(_))
    }

    pub fn get(&self) -> &T {
        match self {
            FetchOutcome::Fetched(value) | FetchOutcome::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            FetchOutcome::Fetched(value) | FetchOutcome::Fallback(value) => value,
        }
    }
}

/// Anything able to read marketing content (the intake API, the CMS).
pub trait ContentSource {
    fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError>;
    fn links(&self, category: &str) -> Result<Vec<Link>, ContentError>;
}

pub fn load_testimonials(source: &dyn ContentSource) -> FetchOutcome<Vec<Testimonial>> {
    fetch_or_default(source.testimonials(), default_testimonials, "testimonials")
}

pub fn load_links(source: &dyn ContentSource, category: &str) -> FetchOutcome<Vec<Link>> {
    fetch_or_default(source.links(category), || default_links(category), "links")
}

fn fetch_or_default<T>(
    fetched: Result<Vec<T>, ContentError>,
    fallback: impl FnOnce() -> Vec<T>,
    what: &str,
) -> FetchOutcome<Vec<T>> {
    match fetched {
        Ok(items) if !items.is_empty() => FetchOutcome::Fetched(items),
        Ok(_) => {
            warn!(content = what, "content source returned nothing; using defaults");
            FetchOutcome::Fallback(fallback())
        }
        Err(err) => {
            warn!(content = what, error = %err, "content fetch failed; using defaults");
            FetchOutcome::Fallback(fallback())
        }
    }
}

pub fn default_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new(
            "Sarah M.",
            "Our driver was waiting at arrivals with a sign and helped with all the ski bags. Stress-free start to the holiday.",
        )
        .with_location("London")
        .with_rating(5),
        Testimonial::new(
            "Thomas K.",
            "Booked a return transfer for six of us. Punctual both ways and the price was exactly what we were quoted.",
        )
        .with_location("Hamburg")
        .with_rating(5),
        Testimonial::new(
            "Emma & James",
            "Flight was delayed by two hours and they simply tracked it and were there when we landed.",
        )
        .with_location("Dublin")
        .with_rating(4),
    ]
}

pub fn default_links(category: &str) -> Vec<Link> {
    let entries: &[(&str, &str, &str)] = match category.trim().to_ascii_lowercase().as_str() {
        "airports" => &[
            ("Geneva Airport", "https://www.gva.ch", "airports"),
            ("Zurich Airport", "https://www.flughafen-zuerich.ch", "airports"),
            ("Lyon Saint-Exupéry", "https://www.lyonaeroports.com", "airports"),
        ],
        "resorts" => &[
            ("Verbier", "https://www.verbier.ch", "resorts"),
            ("Chamonix", "https://www.chamonix.com", "resorts"),
            ("Val d'Isère", "https://www.valdisere.com", "resorts"),
        ],
        _ => &[],
    };
    entries
        .iter()
        .map(|(title, url, category)| Link {
            title: (*title).to_string(),
            url: (*url).to_string(),
            category: (*category).to_string(),
            description: None,
        })
        .collect()
}

use booking_core::{load_links, load_testimonials, ContentError, ContentSource, FetchOutcome};
use booking_domain::{Link, Testimonial};

struct Unreachable;

impl ContentSource for Unreachable {
    fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError> {
        Err(ContentError("connection reset".into()))
    }

    fn links(&self, _category: &str) -> Result<Vec<Link>, ContentError> {
        Err(ContentError("connection reset".into()))
    }
}

struct Static(Vec<Testimonial>);

impl ContentSource for Static {
    fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError> {
        Ok(self.0.clone())
    }

    fn links(&self, category: &str) -> Result<Vec<Link>, ContentError> {
        Ok(vec![Link {
            title: "Saas-Fee".into(),
            url: "https://www.saas-fee.ch".into(),
            category: category.into(),
            description: Some("Car-free village".into()),
        }])
    }
}

#[test]
fn failed_fetch_falls_back_to_defaults() {
    let outcome = load_testimonials(&Unreachable);
    assert!(outcome.is_fallback());
    assert!(!outcome.get().is_empty());

    let links = load_links(&Unreachable, "Airports");
    assert!(links.is_fallback());
    assert!(links.get().iter().all(|link| link.category == "airports"));

    assert!(load_links(&Unreachable, "ferries").into_inner().is_empty());
}

#[test]
fn empty_fetch_is_treated_as_a_fallback() {
    let outcome = load_testimonials(&Static(Vec::new()));
    assert!(outcome.is_fallback());
    assert_eq!(outcome.get().len(), 3);
}

#[test]
fn fetched_content_is_passed_through() {
    let only = Testimonial::new("Lena", "Great driver").with_rating(5);
    let outcome = load_testimonials(&Static(vec![only.clone()]));
    assert_eq!(outcome, FetchOutcome::Fetched(vec![only]));

    let links = load_links(&Static(Vec::new()), "resorts").into_inner();
    assert_eq!(links[0].category, "resorts");
}

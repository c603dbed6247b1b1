//! HTTP handlers, one module per resource.

pub mod booking;
pub mod contact;
pub mod content;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Routes mounted under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/booking",
            get(booking::health_check).post(booking::submit_booking),
        )
        .route("/contact", post(contact::submit_contact))
        .route("/links", get(content::list_links))
        .route("/testimonials", get(content::list_testimonials))
}

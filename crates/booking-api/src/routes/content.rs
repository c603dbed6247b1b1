//! CMS-backed marketing content.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use booking_domain::{Link, Testimonial};

use crate::{error::ApiError, models::LinksQuery, AppState};

pub async fn list_links(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LinksQuery>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let category = query
        .category()
        .ok_or_else(|| ApiError::BadRequest("category is required".into()))?;
    let links = state.cms.links(category).await?;
    Ok(Json(links))
}

pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state.cms.testimonials().await?;
    Ok(Json(testimonials))
}

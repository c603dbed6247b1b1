use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use booking_core::check_contact_intake;
use booking_domain::ContactMessage;
use tracing::info;

use crate::{emails, error::ApiError, models::ContactResponse, AppState};

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(message) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    check_contact_intake(&message)?;

    state
        .mailer
        .send(&emails::operator_contact(&state.operator_email, &message))
        .await?;
    info!(from = %message.email.trim(), "contact message forwarded");

    Ok(Json(ContactResponse {
        success: true,
        message: "Thanks for getting in touch. We will reply shortly.".into(),
    }))
}

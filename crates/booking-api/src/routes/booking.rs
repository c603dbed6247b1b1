//! Booking intake and health check.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use booking_core::{check_booking_intake, BookingReceipt, PriceEstimate, QuoteId};
use booking_domain::BookingRecord;
use tracing::{error, info, warn};

use crate::{
    emails,
    error::ApiError,
    mailer::MailError,
    models::HealthResponse,
    AppState,
};

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        service: "booking".into(),
        timestamp: state.clock.now().to_rfc3339(),
    })
}

/// Prices the booking, issues a quote id and e-mails both parties. Answers
/// 200 once the input is accepted, whatever happens to the e-mails.
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingRecord>, JsonRejection>,
) -> Result<Json<BookingReceipt>, ApiError> {
    let Json(record) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    check_booking_intake(&record)?;

    let estimate = state.pricing.estimate(&record);
    let quote_id = QuoteId::generate(state.clock.as_ref());
    info!(
        quote_id = %quote_id,
        route = %record.journey.route_label(),
        total = estimate.total,
        "booking request accepted"
    );

    let delivery = deliver_quote(&state, &record, &quote_id, &estimate).await;
    let email = record.passenger.email.trim();
    let (email_sent, message) = match (delivery.customer, delivery.operator) {
        (Ok(()), Ok(())) => (true, format!("Your quote has been sent to {email}")),
        (Ok(()), Err(err)) => {
            warn!(quote_id = %quote_id, error = %err, "operator booking e-mail failed");
            notify_failure(&state, &record, &quote_id, &err).await;
            (
                false,
                format!("Your quote has been sent to {email}, but our team could not be notified: {err}"),
            )
        }
        (Err(err), operator) => {
            warn!(quote_id = %quote_id, error = %err, "quote e-mail failed");
            if let Err(operator_err) = &operator {
                warn!(quote_id = %quote_id, error = %operator_err, "operator booking e-mail failed");
            }
            notify_failure(&state, &record, &quote_id, &err).await;
            (
                false,
                format!("Your quote {quote_id} was created but the e-mail could not be sent: {err}"),
            )
        }
    };

    Ok(Json(BookingReceipt {
        success: true,
        quote_id,
        estimated_price: estimate.total,
        currency: estimate.currency,
        email_sent,
        message,
    }))
}

/// Outcome of each quote e-mail. Both are always attempted.
struct QuoteDelivery {
    customer: Result<(), MailError>,
    operator: Result<(), MailError>,
}

async fn deliver_quote(
    state: &AppState,
    record: &BookingRecord,
    quote_id: &QuoteId,
    estimate: &PriceEstimate,
) -> QuoteDelivery {
    let customer = state
        .mailer
        .send(&emails::customer_quote(record, quote_id, estimate))
        .await;
    let operator = state
        .mailer
        .send(&emails::operator_booking(
            &state.operator_email,
            record,
            quote_id,
            estimate,
        ))
        .await;
    QuoteDelivery { customer, operator }
}

async fn notify_failure(
    state: &AppState,
    record: &BookingRecord,
    quote_id: &QuoteId,
    err: &MailError,
) {
    let notice =
        emails::delivery_failure(&state.operator_email, record, quote_id, &err.to_string());
    if let Err(notify_err) = state.mailer.send(&notice).await {
        error!(quote_id = %quote_id, error = %notify_err, "operator failure notice not sent");
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use booking_core::IntakeError;
use thiserror::Error;

use crate::{cms::CmsError, mailer::MailError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("failed to send email: {0}")]
    Mail(#[from] MailError),

    #[error("failed to fetch content: {0}")]
    Cms(#[from] CmsError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Mail(_) | ApiError::Cms(_) | ApiError::Bind { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

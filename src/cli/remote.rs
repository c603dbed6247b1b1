//! Blocking HTTP clients for the intake service.

use booking_config::ClientSettings;
use booking_core::{BookingReceipt, BookingSubmitter, ContentError, ContentSource, SubmitError};
use booking_domain::{BookingRecord, Link, Testimonial};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cli::core::CliError;

fn build_client(settings: &ClientSettings) -> Result<Client, CliError> {
    Client::builder()
        .timeout(settings.timeout())
        .build()
        .map_err(|err| CliError::Input(format!("cannot create HTTP client: {err}")))
}

/// Posts the record to `POST /api/booking`.
pub struct HttpSubmitter {
    client: Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(settings: &ClientSettings) -> Result<Self, CliError> {
        Ok(Self {
            client: build_client(settings)?,
            url: settings.booking_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl BookingSubmitter for HttpSubmitter {
    fn submit(&mut self, record: &BookingRecord) -> Result<BookingReceipt, SubmitError> {
        debug!(url = %self.url, "submitting booking");
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: error_message(response),
            });
        }
        let receipt: BookingReceipt = response
            .json()
            .map_err(|err| SubmitError::InvalidResponse(err.to_string()))?;
        if !receipt.success {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: receipt.message,
            });
        }
        Ok(receipt)
    }
}

fn transport_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Transport(err.to_string())
    }
}

/// `error` field of a JSON error body, else the status reason.
fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        })
}

/// Reads testimonials and links through the intake service.
pub struct ApiContentSource {
    client: Client,
    settings: ClientSettings,
}

impl ApiContentSource {
    pub fn new(settings: &ClientSettings) -> Result<Self, CliError> {
        Ok(Self {
            client: build_client(settings)?,
            settings: settings.clone(),
        })
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let response = self
            .client
            .get(self.settings.endpoint(path))
            .query(query)
            .send()
            .map_err(|err| ContentError(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError(format!("status {}", status.as_u16())));
        }
        response.json().map_err(|err| ContentError(err.to_string()))
    }
}

impl ContentSource for ApiContentSource {
    fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError> {
        self.get("api/testimonials", &[])
    }

    fn links(&self, category: &str) -> Result<Vec<Link>, ContentError> {
        self.get("api/links", &[("category", category)])
    }
}

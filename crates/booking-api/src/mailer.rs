//! Outgoing e-mail.
//!
//! [`HttpMailer`] talks to a Resend-style JSON endpoint; [`DisabledMailer`]
//! stands in when no provider is configured.

use std::time::Duration;

use async_trait::async_trait;
use booking_config::MailSettings;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("e-mail delivery is disabled")]
    Disabled,
    #[error("mail provider unreachable: {0}")]
    Transport(String),
    #[error("mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        debug!(to = %email.to, subject = %email.subject, "mail disabled; not sending");
        Err(MailError::Disabled)
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|err| MailError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            from: settings.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let payload = SendRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            text: &email.text,
            html: email.html.as_deref(),
            reply_to: email.reply_to.as_deref(),
        };
        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        info!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}

/// Mailer matching the configured settings.
pub fn from_settings(settings: &MailSettings) -> Result<Box<dyn Mailer>, MailError> {
    if settings.enabled {
        Ok(Box::new(HttpMailer::new(settings)?))
    } else {
        Ok(Box::new(DisabledMailer))
    }
}

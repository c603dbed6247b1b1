//! Read-only access to the headless CMS holding testimonials and links.

use std::time::Duration;

use async_trait::async_trait;
use booking_config::CmsSettings;
use booking_domain::{Link, Testimonial};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// String fields are coalesced so documents with missing text still decode.
const TESTIMONIALS_QUERY: &str = r#"*[_type == "testimonial"] | order(_createdAt desc) {
  "name": coalesce(name, ""), "quote": coalesce(quote, ""), location, rating
}"#;
const LINKS_QUERY: &str = r#"*[_type == "link" && category == $category] | order(title asc) {
  "title": coalesce(title, ""), "url": coalesce(url, ""), "category": coalesce(category, ""), description
}"#;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CmsError {
    #[error("no CMS project is configured")]
    NotConfigured,
    #[error("CMS unreachable: {0}")]
    Transport(String),
    #[error("CMS answered with status {0}")]
    Status(u16),
    #[error("unexpected CMS payload: {0}")]
    Payload(String),
}

#[async_trait]
pub trait CmsClient: Send + Sync {
    async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError>;
    async fn links(&self, category: &str) -> Result<Vec<Link>, CmsError>;
}

/// Placeholder used while no project id is set; every query fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredCms;

#[async_trait]
impl CmsClient for UnconfiguredCms {
    async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError> {
        Err(CmsError::NotConfigured)
    }

    async fn links(&self, _category: &str) -> Result<Vec<Link>, CmsError> {
        Err(CmsError::NotConfigured)
    }
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Vec<T>,
}

/// GROQ-over-HTTP client for a Sanity dataset.
#[derive(Debug, Clone)]
pub struct SanityClient {
    client: reqwest::Client,
    query_url: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(query_url: String, token: Option<String>) -> Result<Self, CmsError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|err| CmsError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            query_url,
            token,
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, CmsError> {
        let mut query: Vec<(&str, String)> = vec![("query", groq.to_string())];
        query.extend(params.iter().cloned());

        let mut request = self.client.get(&self.query_url).query(&query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| CmsError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status(status.as_u16()));
        }
        let body: QueryResponse<T> = response
            .json()
            .await
            .map_err(|err| CmsError::Payload(err.to_string()))?;
        debug!(count = body.result.len(), "cms query answered");
        Ok(body.result)
    }
}

#[async_trait]
impl CmsClient for SanityClient {
    async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError> {
        self.query(TESTIMONIALS_QUERY, &[]).await
    }

    async fn links(&self, category: &str) -> Result<Vec<Link>, CmsError> {
        // GROQ parameters are passed as JSON literals.
        let literal =
            serde_json::to_string(category).map_err(|err| CmsError::Payload(err.to_string()))?;
        self.query(LINKS_QUERY, &[("$category", literal)]).await
    }
}

pub fn from_settings(settings: &CmsSettings) -> Result<Box<dyn CmsClient>, CmsError> {
    match settings.query_url() {
        Some(url) => Ok(Box::new(SanityClient::new(url, settings.token.clone())?)),
        None => Ok(Box::new(UnconfiguredCms)),
    }
}

//! booking-api
//!
//! HTTP intake service for the booking wizard: booking submission with
//! quote e-mails, the contact form and CMS-backed content.
//!
//! Routes (all under `/api`):
//!
//! * `POST /booking`, `GET /booking` (health)
//! * `POST /contact`
//! * `GET /links?category=<name>`
//! * `GET /testimonials`

pub mod cms;
pub mod emails;
pub mod error;
pub mod mailer;
pub mod models;
pub mod routes;

use std::{future::Future, sync::Arc, time::Duration};

use axum::Router;
use booking_config::Config;
use booking_core::{Clock, PriceTable, SystemClock};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

pub use cms::{CmsClient, CmsError};
pub use error::ApiError;
pub use mailer::{Email, MailError, Mailer};
pub use models::*;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub cms: Arc<dyn CmsClient>,
    pub pricing: PriceTable,
    pub operator_email: String,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        cms: Arc<dyn CmsClient>,
        operator_email: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            cms,
            pricing: PriceTable::default(),
            operator_email: operator_email.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_pricing(mut self, pricing: PriceTable) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let mailer: Arc<dyn Mailer> = mailer::from_settings(&config.mail)?.into();
        let cms: Arc<dyn CmsClient> = cms::from_settings(&config.cms)?.into();
        if !config.mail.enabled {
            warn!("mail delivery disabled; bookings will report emailSent=false");
        }
        Ok(Self::new(mailer, cms, config.mail.operator_email.clone())
            .with_pricing(config.pricing.clone()))
    }
}

/// Builds the service router.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        // Bounds each request so graceful shutdown cannot hang.
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serves the API until Ctrl-C. `addr` overrides `server.bind_addr`.
pub async fn serve(config: &Config, addr: Option<&str>) -> Result<(), ApiError> {
    let state = AppState::from_config(config)?;
    let addr = addr.unwrap_or(&config.server.bind_addr).to_string();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(addr = %addr, "booking service listening");
    run(listener, state, config.server.request_timeout(), shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn run<F>(
    listener: TcpListener,
    state: AppState,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), ApiError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state, request_timeout))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    info!("booking service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("starting graceful shutdown");
}

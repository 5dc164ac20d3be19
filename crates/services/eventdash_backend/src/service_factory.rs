// --- File: crates/services/eventdash_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the booking service client, the session provider and the dashboard
//! from the application configuration.
use eventdash_bookings::{
    CancellationWorkflow, Dashboard, HttpBookingService, HttpSessionProvider, Navigation,
    StaticSessionProvider,
};
use eventdash_common::{EventdashError, SessionProvider};
use eventdash_config::{AppConfig, SessionMode};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct EventdashServiceFactory {
    config: Arc<AppConfig>,
}

impl EventdashServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// HTTP client for the booking service, carrying the session credentials.
    pub fn booking_service(&self) -> Result<HttpBookingService, EventdashError> {
        info!(
            "Initializing booking service client for {}",
            self.config.bookings.base_url
        );
        Ok(HttpBookingService::from_config(
            &self.config.bookings,
            &self.config.session,
        )?)
    }

    /// Session provider selected by `session.mode`.
    pub fn session_provider(&self) -> Result<Arc<dyn SessionProvider>, EventdashError> {
        match self.config.session.mode {
            SessionMode::Http => {
                info!(
                    "Reading sessions from {}{}",
                    self.config.bookings.base_url, self.config.session.endpoint
                );
                let provider =
                    HttpSessionProvider::from_config(&self.config.bookings, &self.config.session)?;
                Ok(Arc::new(provider))
            }
            SessionMode::Static => {
                info!("Using static session configuration");
                Ok(Arc::new(StaticSessionProvider::from_config(
                    &self.config.session,
                )))
            }
        }
    }

    /// Per-cancel timeout; `0` in the configuration disables it.
    pub fn cancel_timeout(&self) -> Option<Duration> {
        match self.config.bookings.cancel_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn dashboard(&self) -> Result<Dashboard<HttpBookingService>, EventdashError> {
        let workflow =
            CancellationWorkflow::new(Arc::new(self.booking_service()?), self.cancel_timeout());

        Ok(Dashboard::new(
            workflow,
            self.session_provider()?,
            Navigation::new(self.config.routes.clone()),
            self.config.bookings.currency_suffix.clone(),
        ))
    }
}

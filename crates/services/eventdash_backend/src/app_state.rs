// --- File: crates/services/eventdash_backend/src/app_state.rs ---
use axum::{routing::get, Router};
use eventdash_bookings::{routes as dashboard_routes, Dashboard, HttpBookingService};
use eventdash_common::EventdashError;
use eventdash_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::EventdashServiceFactory;

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dashboard: Arc<Dashboard<HttpBookingService>>,
}

impl AppState {
    /// Wires the dashboard and its collaborators from `config`.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, EventdashError> {
        let factory = EventdashServiceFactory::new(config.clone());
        Ok(Self {
            dashboard: Arc::new(factory.dashboard()?),
            config,
        })
    }

    /// All API routes, nested under `/api`.
    pub fn api_router(&self) -> Router {
        let api_router = Router::new()
            .route("/", get(|| async { "Welcome to the Eventdash API!" }))
            .merge(dashboard_routes::routes(self.dashboard.clone()));

        Router::new().nest("/api", api_router)
    }
}

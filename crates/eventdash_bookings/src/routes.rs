// --- File: crates/eventdash_bookings/src/routes.rs ---

use axum::{
    routing::{delete, get, post},
    Router,
};
use eventdash_common::BookingService;
use std::sync::Arc;

use crate::dashboard::Dashboard;
use crate::handlers::{
    cancel_booking_handler, dashboard_handler, home_handler, refresh_handler,
    show_all_events_handler,
};

/// Creates a router containing all dashboard routes. Mount it under `/api`.
pub fn routes<S: BookingService + 'static>(dashboard: Arc<Dashboard<S>>) -> Router {
    Router::new()
        .route("/home", get(home_handler::<S>))
        .route("/dashboard", get(dashboard_handler::<S>))
        .route("/dashboard/refresh", post(refresh_handler::<S>))
        .route(
            "/dashboard/bookings/{booking_id}",
            delete(cancel_booking_handler::<S>),
        )
        .route("/dashboard/events", get(show_all_events_handler::<S>))
        .with_state(dashboard)
}

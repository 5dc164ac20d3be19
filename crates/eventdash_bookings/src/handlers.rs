// --- File: crates/eventdash_bookings/src/handlers.rs ---
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use eventdash_common::{validation_error, BookingService, EventdashError};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::dashboard::{Dashboard, DashboardOutcome, HomeOutcome};

/// Shared state of the dashboard routes.
pub type DashboardState<S> = Arc<Dashboard<S>>;

/// `303 See Other` with the target both in `Location` and in the body.
pub fn redirect_response(location: String) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location.clone())],
        Json(json!({ "redirect": location })),
    )
        .into_response()
}

fn dashboard_response(outcome: DashboardOutcome) -> Response {
    match outcome {
        DashboardOutcome::Pending => {
            (StatusCode::ACCEPTED, Json(json!({ "status": "loading" }))).into_response()
        }
        DashboardOutcome::Redirect(location) => redirect_response(location),
        DashboardOutcome::Ready(view) => Json(view).into_response(),
    }
}

/// Landing page, or a redirect to the dashboard for a signed-in user.
pub async fn home_handler<S: BookingService + 'static>(
    State(dashboard): State<DashboardState<S>>,
) -> Response {
    match dashboard.home().await {
        HomeOutcome::Redirect(location) => redirect_response(location),
        HomeOutcome::Landing(links) => Json(links).into_response(),
    }
}

/// Current dashboard view.
pub async fn dashboard_handler<S: BookingService + 'static>(
    State(dashboard): State<DashboardState<S>>,
) -> Response {
    dashboard_response(dashboard.open().await)
}

/// Fetches the booking list again and returns the new view.
pub async fn refresh_handler<S: BookingService + 'static>(
    State(dashboard): State<DashboardState<S>>,
) -> Response {
    dashboard_response(dashboard.refresh().await)
}

/// Cancels one booking. The view in the response carries the outcome in
/// `last_cancel`; a failed cancellation is still a `200`.
pub async fn cancel_booking_handler<S: BookingService + 'static>(
    State(dashboard): State<DashboardState<S>>,
    Path(booking_id): Path<String>,
) -> Result<Response, EventdashError> {
    // ids are opaque: reject blank ones but match the rest exactly as sent
    if booking_id.trim().is_empty() {
        return Err(validation_error("booking id must not be blank"));
    }

    info!("Cancel requested for booking {:?}", booking_id);
    Ok(dashboard_response(dashboard.cancel(&booking_id).await))
}

/// Target of the "Show All Events" button.
pub async fn show_all_events_handler<S: BookingService + 'static>(
    State(dashboard): State<DashboardState<S>>,
) -> Response {
    dashboard_response(dashboard.show_all_events())
}

// File: crates/eventdash_bookings/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::dashboard::{BookingRow, DashboardView, LandingView};
use crate::logic::Totals;
use crate::workflow::{CancelOutcome, CancelState};

#[utoipa::path(
    get,
    path = "/home",
    responses(
        (status = 200, description = "Landing links for visitors", body = LandingView,
         example = json!({
             "browse_events_href": "/events",
             "sign_in_href": "/auth/signin"
         })
        ),
        (status = 303, description = "Signed in; go to the dashboard",
         example = json!({ "redirect": "/dashboard" })
        )
    ),
    tag = "Dashboard"
)]
fn doc_home_handler() {}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Bookings of the signed-in user with totals", body = DashboardView,
         example = json!({
             "user_name": "Nadia",
             "user_initial": "N",
             "totals": { "total_tickets": 3, "total_cost": 2000.0 },
             "total_cost_display": "2000 TK",
             "bookings": [
                 {
                     "id": "a",
                     "title": "Dhaka Jazz Night",
                     "venue": "Shilpakala Academy",
                     "date": "2026-03-14T19:30:00Z",
                     "seats": 2,
                     "line_cost": 1000.0,
                     "line_cost_display": "1000 TK",
                     "state": "idle",
                     "details_href": "/events/ev-7"
                 }
             ],
             "is_empty": false,
             "show_all_events_href": "/events"
         })
        ),
        (status = 202, description = "Session still loading",
         example = json!({ "status": "loading" })
        ),
        (status = 303, description = "Not signed in; go home",
         example = json!({ "redirect": "/" })
        )
    ),
    tag = "Dashboard"
)]
fn doc_dashboard_handler() {}

#[utoipa::path(
    post,
    path = "/dashboard/refresh",
    responses(
        (status = 200, description = "Freshly fetched dashboard", body = DashboardView),
        (status = 202, description = "Session still loading"),
        (status = 303, description = "Not signed in; go home")
    ),
    tag = "Dashboard"
)]
fn doc_refresh_handler() {}

#[utoipa::path(
    delete,
    path = "/dashboard/bookings/{booking_id}",
    params(
        ("booking_id" = String, Path, description = "Id of the booking to cancel")
    ),
    responses(
        (status = 200, description = "Dashboard after the attempt; see last_cancel", body = DashboardView),
        (status = 202, description = "Session still loading"),
        (status = 303, description = "Not signed in; go home"),
        (status = 400, description = "Blank booking id",
         example = json!({ "error": { "message": "Validation error: booking id must not be blank", "code": 400 } })
        )
    ),
    tag = "Dashboard"
)]
fn doc_cancel_booking_handler() {}

#[utoipa::path(
    get,
    path = "/dashboard/events",
    responses(
        (status = 303, description = "Go to the events listing",
         example = json!({ "redirect": "/events" })
        )
    ),
    tag = "Dashboard"
)]
fn doc_show_all_events_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_home_handler,
        doc_dashboard_handler,
        doc_refresh_handler,
        doc_cancel_booking_handler,
        doc_show_all_events_handler
    ),
    components(
        schemas(
            DashboardView,
            BookingRow,
            LandingView,
            Totals,
            CancelState,
            CancelOutcome
        )
    ),
    tags(
        (name = "Dashboard", description = "My Bookings dashboard")
    ),
    servers(
        (url = "/api", description = "Eventdash BFF")
    )
)]
pub struct DashboardApiDoc;

//! Dashboard controller.
//!
//! Ties the session provider, the cancellation workflow and navigation
//! together. The booking list is fetched once per authenticated session
//! activation and dropped when the session goes away.

use chrono::{DateTime, Utc};
use eventdash_common::{BookingService, SessionProvider, SessionStatus, SessionUser};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::logic::{format_amount, line_cost, user_initial, Totals};
use crate::navigation::{Navigation, Route};
use crate::workflow::{BookingEntry, CancelOutcome, CancelState, CancellationWorkflow};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One row of the "My Bookings" grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingRow {
    pub id: String,
    pub title: Option<String>,
    pub venue: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub seats: u32,
    pub line_cost: f64,
    #[cfg_attr(feature = "openapi", schema(example = "1000 TK"))]
    pub line_cost_display: String,
    pub state: CancelState,
    /// Link to the event page; absent when the booking carries no event id.
    pub details_href: Option<String>,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardView {
    pub user_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "N"))]
    pub user_initial: String,
    pub totals: Totals,
    #[cfg_attr(feature = "openapi", schema(example = "2000 TK"))]
    pub total_cost_display: String,
    pub bookings: Vec<BookingRow>,
    pub is_empty: bool,
    pub show_all_events_href: String,
    /// Set on responses to a cancel request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cancel: Option<CancelOutcome>,
}

/// Links offered on the landing page to visitors without a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LandingView {
    pub browse_events_href: String,
    pub sign_in_href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardOutcome {
    /// Session still loading; nothing to show yet.
    Pending,
    /// Send the user elsewhere.
    Redirect(String),
    Ready(DashboardView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeOutcome {
    Redirect(String),
    Landing(LandingView),
}

pub struct Dashboard<S> {
    workflow: CancellationWorkflow<S>,
    sessions: Arc<dyn SessionProvider>,
    navigation: Navigation,
    currency_suffix: String,
    // true once the list was fetched for the current session
    active: Mutex<bool>,
}

impl<S: BookingService> Dashboard<S> {
    pub fn new(
        workflow: CancellationWorkflow<S>,
        sessions: Arc<dyn SessionProvider>,
        navigation: Navigation,
        currency_suffix: impl Into<String>,
    ) -> Self {
        Self {
            workflow,
            sessions,
            navigation,
            currency_suffix: currency_suffix.into(),
            active: Mutex::new(false),
        }
    }

    pub fn workflow(&self) -> &CancellationWorkflow<S> {
        &self.workflow
    }

    /// Opens the dashboard: redirect home without a session, otherwise the
    /// current view (fetching the list on the first open of a session).
    pub async fn open(&self) -> DashboardOutcome {
        self.with_session(false).await
    }

    /// Like [`Dashboard::open`], but always fetches the list again.
    pub async fn refresh(&self) -> DashboardOutcome {
        self.with_session(true).await
    }

    /// Cancels a booking for the signed-in user.
    pub async fn cancel(&self, booking_id: &str) -> DashboardOutcome {
        let user = match self.session_gate().await {
            Ok(user) => user,
            Err(outcome) => return outcome,
        };
        self.activate(false).await;

        let outcome = self.workflow.cancel(booking_id).await;
        DashboardOutcome::Ready(self.view(&user, Some(outcome)))
    }

    /// The "Show All Events" button.
    pub fn show_all_events(&self) -> DashboardOutcome {
        DashboardOutcome::Redirect(self.navigation.href(&Route::Events))
    }

    /// Landing page: signed-in users go straight to the dashboard.
    pub async fn home(&self) -> HomeOutcome {
        match self.session_status().await {
            SessionStatus::Authenticated(_) => {
                HomeOutcome::Redirect(self.navigation.href(&Route::Dashboard))
            }
            SessionStatus::Loading | SessionStatus::Unauthenticated => {
                HomeOutcome::Landing(LandingView {
                    browse_events_href: self.navigation.href(&Route::Events),
                    sign_in_href: self.navigation.href(&Route::SignIn),
                })
            }
        }
    }

    async fn with_session(&self, force_fetch: bool) -> DashboardOutcome {
        match self.session_gate().await {
            Ok(user) => {
                self.activate(force_fetch).await;
                DashboardOutcome::Ready(self.view(&user, None))
            }
            Err(outcome) => outcome,
        }
    }

    async fn session_gate(&self) -> Result<SessionUser, DashboardOutcome> {
        match self.session_status().await {
            SessionStatus::Authenticated(user) => Ok(user),
            SessionStatus::Loading => Err(DashboardOutcome::Pending),
            SessionStatus::Unauthenticated => {
                self.deactivate().await;
                Err(DashboardOutcome::Redirect(self.navigation.href(&Route::Home)))
            }
        }
    }

    async fn session_status(&self) -> SessionStatus {
        match self.sessions.current_session().await {
            Ok(status) => status,
            Err(err) => {
                warn!("Session lookup failed, treating as signed out: {}", err);
                SessionStatus::Unauthenticated
            }
        }
    }

    async fn activate(&self, force_fetch: bool) {
        let mut active = self.active.lock().await;
        if force_fetch || !*active {
            self.workflow.fetch_all().await;
            *active = true;
        }
    }

    async fn deactivate(&self) {
        let mut active = self.active.lock().await;
        if *active {
            info!("Session ended, dropping booking list");
            *active = false;
        }
        self.workflow.clear();
    }

    fn view(&self, user: &SessionUser, last_cancel: Option<CancelOutcome>) -> DashboardView {
        let snapshot = self.workflow.snapshot();
        let bookings: Vec<BookingRow> = snapshot
            .bookings
            .into_iter()
            .map(|entry| self.row(entry))
            .collect();

        DashboardView {
            user_name: user.name.clone(),
            user_initial: user_initial(user.name.as_deref()),
            total_cost_display: format_amount(snapshot.totals.total_cost, &self.currency_suffix),
            totals: snapshot.totals,
            is_empty: bookings.is_empty(),
            bookings,
            show_all_events_href: self.navigation.href(&Route::Events),
            last_cancel,
        }
    }

    fn row(&self, entry: BookingEntry) -> BookingRow {
        let cost = line_cost(&entry.booking);
        let seats = entry.booking.quantity_or_default();
        let event = entry.booking.event.unwrap_or_default();

        BookingRow {
            id: entry.booking.id,
            details_href: event
                .id
                .map(|event_id| self.navigation.href(&Route::EventDetails(event_id))),
            title: event.title,
            venue: event.venue,
            date: event.date,
            seats,
            line_cost: cost,
            line_cost_display: format_amount(cost, &self.currency_suffix),
            state: entry.state,
        }
    }
}

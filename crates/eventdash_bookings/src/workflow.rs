//! Cancellation workflow.
//!
//! [`CancellationWorkflow`] owns the booking list of one dashboard and the
//! per-booking cancellation state. A booking is either `Idle` or
//! `Cancelling`; only an `Idle` booking that is in the list can be cancelled,
//! and the booking always returns to `Idle` when the delete request ends,
//! however it ends.
//!
//! The list and the state set sit behind one `std::sync::Mutex`. The lock is
//! only taken for short synchronous sections and never across an `.await`, so
//! cancellations of different bookings run concurrently.

use eventdash_common::{Booking, BookingService};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::logic::{compute_totals, Totals};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Cancellation state of a single booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CancelState {
    Idle,
    Cancelling,
}

/// Result of a [`CancellationWorkflow::cancel`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CancelOutcome {
    /// The service confirmed the deletion and the booking left the list.
    Cancelled,
    /// The delete failed or timed out; the booking is still listed.
    Failed { reason: String },
    /// Another cancellation of this booking is in flight; nothing was sent.
    AlreadyCancelling,
    /// No booking with this id is listed; nothing was sent.
    NotFound,
}

/// A booking together with its cancellation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingEntry {
    pub booking: Booking,
    pub state: CancelState,
}

/// Read-only copy of the workflow state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    pub bookings: Vec<BookingEntry>,
    pub totals: Totals,
}

#[derive(Debug, Default)]
struct WorkflowState {
    bookings: Vec<Booking>,
    cancelling: HashSet<String>,
}

/// State container for the booking list and in-flight cancellations.
pub struct CancellationWorkflow<S> {
    service: Arc<S>,
    state: Mutex<WorkflowState>,
    cancel_timeout: Option<Duration>,
}

/// Marks a booking as `Cancelling` for as long as it lives.
///
/// Dropping it (normal return, early return, panic, or the cancel future being
/// dropped mid-flight) puts the booking back to `Idle`.
struct CancellingGuard<'a> {
    state: &'a Mutex<WorkflowState>,
    booking_id: String,
}

impl Drop for CancellingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).cancelling.remove(&self.booking_id);
        debug!("Booking {} is idle again", self.booking_id);
    }
}

fn lock(state: &Mutex<WorkflowState>) -> MutexGuard<'_, WorkflowState> {
    // The state stays consistent even if a holder panicked: every critical
    // section is a single insert, remove, retain or assignment.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: BookingService> CancellationWorkflow<S> {
    /// Creates an empty workflow.
    ///
    /// `cancel_timeout` bounds each delete request; `None` waits for the
    /// service however long it takes.
    pub fn new(service: Arc<S>, cancel_timeout: Option<Duration>) -> Self {
        Self {
            service,
            state: Mutex::new(WorkflowState::default()),
            cancel_timeout,
        }
    }

    /// Replaces the list with the service's current bookings.
    ///
    /// Any failure yields an empty list. Duplicate ids keep their first
    /// occurrence. Returns the number of bookings now listed.
    pub async fn fetch_all(&self) -> usize {
        let fetched = match self.service.list_bookings().await {
            Ok(bookings) => dedupe_by_id(bookings),
            Err(err) => {
                warn!("Fetching bookings failed, showing an empty list: {}", err);
                Vec::new()
            }
        };

        let count = fetched.len();
        lock(&self.state).bookings = fetched;
        info!("Loaded {} bookings", count);
        count
    }

    /// Cancels one booking.
    ///
    /// Only a listed booking in the `Idle` state is sent to the service; any
    /// other call returns immediately without a request. On confirmation the
    /// booking is removed by id; on failure the list is left alone. The
    /// booking is `Idle` again once this returns.
    pub async fn cancel(&self, booking_id: &str) -> CancelOutcome {
        let _guard = match self.begin_cancel(booking_id) {
            Ok(guard) => guard,
            Err(outcome) => return outcome,
        };

        let result = match self.cancel_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.service.delete_booking(booking_id)).await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(_) => Err(format!(
                        "no answer from booking service within {}s",
                        limit.as_secs_f64()
                    )),
                }
            }
            None => self
                .service
                .delete_booking(booking_id)
                .await
                .map_err(|e| e.to_string()),
        };

        match result {
            Ok(()) => {
                lock(&self.state).bookings.retain(|b| b.id != booking_id);
                info!("Booking {} cancelled", booking_id);
                CancelOutcome::Cancelled
            }
            Err(reason) => {
                warn!("Cancelling booking {} failed: {}", booking_id, reason);
                CancelOutcome::Failed { reason }
            }
        }
    }

    fn begin_cancel(&self, booking_id: &str) -> Result<CancellingGuard<'_>, CancelOutcome> {
        let mut state = lock(&self.state);

        if !state.bookings.iter().any(|b| b.id == booking_id) {
            debug!("Ignoring cancel for unknown booking {}", booking_id);
            return Err(CancelOutcome::NotFound);
        }
        if !state.cancelling.insert(booking_id.to_string()) {
            debug!("Booking {} is already being cancelled", booking_id);
            return Err(CancelOutcome::AlreadyCancelling);
        }

        debug!("Booking {} is cancelling", booking_id);
        Ok(CancellingGuard {
            state: &self.state,
            booking_id: booking_id.to_string(),
        })
    }

    /// State of one booking; `None` when it is not listed.
    pub fn state_of(&self, booking_id: &str) -> Option<CancelState> {
        let state = lock(&self.state);
        if !state.bookings.iter().any(|b| b.id == booking_id) {
            return None;
        }
        Some(if state.cancelling.contains(booking_id) {
            CancelState::Cancelling
        } else {
            CancelState::Idle
        })
    }

    pub fn is_cancelling(&self, booking_id: &str) -> bool {
        self.state_of(booking_id) == Some(CancelState::Cancelling)
    }

    /// Copy of the listed bookings in service order.
    pub fn bookings(&self) -> Vec<Booking> {
        lock(&self.state).bookings.clone()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = lock(&self.state);
        let bookings = state
            .bookings
            .iter()
            .map(|booking| BookingEntry {
                state: if state.cancelling.contains(&booking.id) {
                    CancelState::Cancelling
                } else {
                    CancelState::Idle
                },
                booking: booking.clone(),
            })
            .collect();

        WorkflowSnapshot {
            bookings,
            totals: compute_totals(&state.bookings),
        }
    }

    /// Drops the list, e.g. when the session ends. In-flight cancellations
    /// finish normally.
    pub fn clear(&self) {
        lock(&self.state).bookings.clear();
    }
}

fn dedupe_by_id(bookings: Vec<Booking>) -> Vec<Booking> {
    let mut seen = HashSet::with_capacity(bookings.len());
    bookings
        .into_iter()
        .filter(|booking| {
            let first = seen.insert(booking.id.clone());
            if !first {
                warn!("Dropping duplicate booking id {}", booking.id);
            }
            first
        })
        .collect()
}

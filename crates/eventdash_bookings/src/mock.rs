//! In-memory booking service for tests.

use eventdash_common::{Booking, BookingService, BoxFuture};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mock booking service: {0}")]
pub struct MockError(pub String);

/// Booking service double.
///
/// Deletes succeed unless the id was marked failing or held. A held delete
/// waits until the test releases it through the returned sender.
#[derive(Default)]
pub struct MockBookingService {
    listing: Mutex<Option<Result<Vec<Booking>, MockError>>>,
    failing: Mutex<HashSet<String>>,
    held: Mutex<HashMap<String, oneshot::Receiver<bool>>>,
    delete_calls: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
}

impl MockBookingService {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let service = Self::default();
        service.set_bookings(bookings);
        service
    }

    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        *self.listing.lock().unwrap() = Some(Ok(bookings));
    }

    pub fn fail_listing(&self, message: &str) {
        *self.listing.lock().unwrap() = Some(Err(MockError(message.to_string())));
    }

    pub fn fail_delete(&self, booking_id: &str) {
        self.failing.lock().unwrap().insert(booking_id.to_string());
    }

    /// Holds the next delete of `booking_id` until the sender is used.
    /// Sending `true` confirms the deletion, `false` rejects it, dropping the
    /// sender looks like a dropped connection.
    pub fn hold_delete(&self, booking_id: &str) -> oneshot::Sender<bool> {
        let (tx, rx) = oneshot::channel();
        self.held.lock().unwrap().insert(booking_id.to_string(), rx);
        tx
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn delete_count(&self, booking_id: &str) -> usize {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|id| *id == booking_id)
            .count()
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl BookingService for MockBookingService {
    type Error = MockError;

    fn list_bookings(&self) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let listing = self
            .listing
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()));
        Box::pin(async move { listing })
    }

    fn delete_booking(&self, booking_id: &str) -> BoxFuture<'_, (), Self::Error> {
        self.delete_calls.lock().unwrap().push(booking_id.to_string());
        let failing = self.failing.lock().unwrap().contains(booking_id);
        let held = self.held.lock().unwrap().remove(booking_id);
        let booking_id = booking_id.to_string();

        Box::pin(async move {
            if let Some(release) = held {
                return match release.await {
                    Ok(true) => Ok(()),
                    Ok(false) => Err(MockError(format!("delete of {} rejected", booking_id))),
                    Err(_) => Err(MockError("connection reset".to_string())),
                };
            }
            if failing {
                return Err(MockError(format!("status 500 deleting {}", booking_id)));
            }
            Ok(())
        })
    }
}

/// Yields to the scheduler until `condition` holds.
pub async fn settle(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

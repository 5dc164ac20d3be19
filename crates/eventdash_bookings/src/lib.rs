// --- File: crates/eventdash_bookings/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod dashboard;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod mock;
pub mod navigation;
pub mod routes;
#[cfg(test)]
mod routes_test;
pub mod session;
pub mod workflow;

pub use client::HttpBookingService;
pub use dashboard::{Dashboard, DashboardOutcome, DashboardView, HomeOutcome};
pub use error::BookingError;
pub use logic::{compute_totals, format_amount, Totals};
pub use navigation::{Navigation, Route};
pub use session::{HttpSessionProvider, StaticSessionProvider};
pub use workflow::{CancelOutcome, CancelState, CancellationWorkflow};

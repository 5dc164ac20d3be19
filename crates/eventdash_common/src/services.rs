//! Service abstractions for external collaborators.
//!
//! This module provides trait definitions for the services the dashboard
//! depends on. They allow for dependency injection and easier testing by
//! decoupling the workflow from the HTTP implementations.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::Booking;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for booking service operations.
///
/// Mirrors the two endpoints the dashboard needs: `GET /api/bookings` and
/// `DELETE /api/bookings/{id}`.
pub trait BookingService: Send + Sync {
    /// Error type returned by booking service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every booking of the signed-in user.
    fn list_bookings(&self) -> BoxFuture<'_, Vec<Booking>, Self::Error>;

    /// Delete one booking. `Ok` only when the service confirmed the deletion.
    fn delete_booking(&self, booking_id: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// The signed-in user, as far as the dashboard cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub name: Option<String>,
}

/// Session status reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionStatus {
    Loading,
    Unauthenticated,
    Authenticated(SessionUser),
}

impl SessionStatus {
    /// Shorthand for an authenticated session with a display name.
    pub fn authenticated(name: impl Into<String>) -> Self {
        SessionStatus::Authenticated(SessionUser {
            name: Some(name.into()),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }
}

/// A trait for session providers.
///
/// Implementations never decide policy: an error is reported as such and the
/// caller decides how to treat it.
pub trait SessionProvider: Send + Sync {
    /// Current session status.
    fn current_session(&self) -> BoxFuture<'_, SessionStatus, BoxedError>;
}

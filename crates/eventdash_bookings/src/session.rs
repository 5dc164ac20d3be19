//! Session providers.
//!
//! [`HttpSessionProvider`] asks the identity provider's session endpoint,
//! which answers `{ "user": { "name": ... }, "expires": ... }` for a signed-in
//! user and `{}` or `null` otherwise. [`StaticSessionProvider`] returns a fixed
//! status and is used for single-user setups and tests.

use eventdash_common::{
    create_client_with_headers, BoxFuture, BoxedError, SessionProvider, SessionStatus, SessionUser,
};
use eventdash_config::{BookingsConfig, SessionConfig};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::sync::RwLock;
use tracing::debug;

use crate::client::{join_path, parse_base_url, session_headers};
use crate::error::BookingError;

#[derive(Debug, Deserialize)]
struct SessionPayload {
    user: Option<SessionUser>,
}

/// Session provider backed by the identity provider's session endpoint.
pub struct HttpSessionProvider {
    client: Client,
    url: Url,
}

impl HttpSessionProvider {
    pub fn new(client: Client, base_url: &str, endpoint: &str) -> Result<Self, BookingError> {
        let base = parse_base_url(base_url)?;
        let url = join_path(&base, endpoint.split('/').filter(|s| !s.is_empty()))?;
        Ok(Self { client, url })
    }

    pub fn from_config(
        bookings: &BookingsConfig,
        session: &SessionConfig,
    ) -> Result<Self, BookingError> {
        let client = create_client_with_headers(
            bookings.request_timeout_secs,
            true,
            session_headers(session)?,
        )?;
        Self::new(client, &bookings.base_url, &session.endpoint)
    }

    async fn fetch_status(&self) -> Result<SessionStatus, BookingError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Session endpoint answered {}", status);
            return Ok(SessionStatus::Unauthenticated);
        }
        if !status.is_success() {
            return Err(BookingError::ApiError {
                status_code: status.as_u16(),
                message: "session endpoint failed".to_string(),
            });
        }

        let payload: Option<SessionPayload> = response.json().await?;
        Ok(match payload.and_then(|p| p.user) {
            Some(user) => SessionStatus::Authenticated(user),
            None => SessionStatus::Unauthenticated,
        })
    }
}

impl SessionProvider for HttpSessionProvider {
    fn current_session(&self) -> BoxFuture<'_, SessionStatus, BoxedError> {
        Box::pin(async move {
            self.fetch_status()
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Session provider with a status set by the owner.
#[derive(Debug)]
pub struct StaticSessionProvider {
    status: RwLock<SessionStatus>,
}

impl StaticSessionProvider {
    pub fn new(status: SessionStatus) -> Self {
        Self {
            status: RwLock::new(status),
        }
    }

    /// Authenticated as `user_name` when configured, unauthenticated otherwise.
    pub fn from_config(session: &SessionConfig) -> Self {
        let status = match session.user_name.as_deref() {
            Some(name) => SessionStatus::authenticated(name),
            None => SessionStatus::Unauthenticated,
        };
        Self::new(status)
    }

    /// Replaces the reported status, e.g. on sign-out.
    pub fn set_status(&self, status: SessionStatus) {
        *self
            .status
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = status;
    }

    fn status(&self) -> SessionStatus {
        self.status
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SessionProvider for StaticSessionProvider {
    fn current_session(&self) -> BoxFuture<'_, SessionStatus, BoxedError> {
        let status = self.status();
        Box::pin(async move { Ok(status) })
    }
}

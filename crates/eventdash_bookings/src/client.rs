//! Booking service client module
//!
//! HTTP implementation of [`BookingService`] against the REST endpoints
//! `GET /api/bookings` and `DELETE /api/bookings/{id}`. Requests carry the
//! configured session cookie or bearer token so the service can identify the
//! user.

use eventdash_common::{create_client_with_headers, Booking, BookingService, BoxFuture};
use eventdash_config::{BookingsConfig, SessionConfig};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE},
    Client, Response, Url,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::BookingError;

/// Builds the headers that identify the user towards upstream services.
pub fn session_headers(session: &SessionConfig) -> Result<HeaderMap, BookingError> {
    let mut headers = HeaderMap::new();

    if let Some(cookie) = session.cookie.as_deref().filter(|c| !c.is_empty()) {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| BookingError::ConfigError(format!("invalid session cookie: {}", e)))?;
        headers.insert(COOKIE, value);
    }

    if let Some(token) = session.bearer_token.as_deref().filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| BookingError::ConfigError(format!("invalid bearer token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Joins `segments` onto the path of `base`, percent-encoding each segment.
pub(crate) fn join_path<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, BookingError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| BookingError::ConfigError(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, BookingError> {
    Url::parse(base_url)
        .map_err(|e| BookingError::ConfigError(format!("invalid base_url {:?}: {}", base_url, e)))
}

/// Client for the booking service REST API.
#[derive(Clone)]
pub struct HttpBookingService {
    client: Client,
    base_url: Url,
}

impl HttpBookingService {
    /// Creates a service client from an existing reqwest client.
    pub fn new(client: Client, base_url: &str) -> Result<Self, BookingError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Creates a service client with the configured timeout and session headers.
    pub fn from_config(
        bookings: &BookingsConfig,
        session: &SessionConfig,
    ) -> Result<Self, BookingError> {
        let client = create_client_with_headers(
            bookings.request_timeout_secs,
            true,
            session_headers(session)?,
        )?;
        Self::new(client, &bookings.base_url)
    }

    /// Fetches all bookings of the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The HTTP request fails
    /// * The service answers with a non-success status
    /// * The body is not JSON or not a JSON array
    ///
    /// Array elements that do not decode as a booking are skipped with a warning.
    pub async fn fetch_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let url = join_path(&self.base_url, ["api", "bookings"])?;
        debug!("Fetching bookings from {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        let payload: Value = response.json().await?;

        let items = match payload {
            Value::Array(items) => items,
            other => {
                return Err(BookingError::UnexpectedPayload(format!(
                    "expected an array of bookings, got {}",
                    json_kind(&other)
                )))
            }
        };

        let total = items.len();
        let bookings: Vec<Booking> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Booking>(item) {
                Ok(booking) => Some(booking),
                Err(err) => {
                    warn!("Skipping booking #{} that failed to decode: {}", index, err);
                    None
                }
            })
            .collect();

        debug!("Decoded {} of {} bookings", bookings.len(), total);
        Ok(bookings)
    }

    /// Deletes a booking. Succeeds only on a 2xx answer.
    pub async fn remove_booking(&self, booking_id: &str) -> Result<(), BookingError> {
        let url = join_path(&self.base_url, ["api", "bookings", booking_id])?;
        debug!("Deleting booking via {}", url);

        let response = self.client.delete(url).send().await?;
        ensure_success(response).await?;

        info!("Booking service confirmed deletion of {}", booking_id);
        Ok(())
    }
}

impl BookingService for HttpBookingService {
    type Error = BookingError;

    fn list_bookings(&self) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
        Box::pin(self.fetch_bookings())
    }

    fn delete_booking(&self, booking_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let booking_id = booking_id.to_string();
        Box::pin(async move { self.remove_booking(&booking_id).await })
    }
}

async fn ensure_success(response: Response) -> Result<Response, BookingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    Err(BookingError::ApiError {
        status_code: status.as_u16(),
        message,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

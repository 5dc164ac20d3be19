// --- File: crates/eventdash_bookings/src/error.rs ---
use eventdash_common::{external_service_error, EventdashError, HttpStatusCode};
use thiserror::Error;

/// Booking-specific error types.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Error occurred during a booking service request
    #[error("Booking service request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The booking service answered with a non-success status
    #[error("Booking service returned status {status_code}: {message}")]
    ApiError { status_code: u16, message: String },

    /// The list endpoint did not return a JSON array
    #[error("Booking service returned an unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Error parsing a booking service response
    #[error("Failed to parse booking service response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("Booking configuration error: {0}")]
    ConfigError(String),
}

/// Convert BookingError to EventdashError
impl From<BookingError> for EventdashError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RequestError(e) => EventdashError::from(e),
            BookingError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Booking API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            BookingError::UnexpectedPayload(msg) => external_service_error("Booking API", msg),
            BookingError::ParseError(e) => {
                EventdashError::ParseError(format!("Booking response parse error: {}", e))
            }
            BookingError::ConfigError(msg) => EventdashError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::RequestError(e) if e.is_timeout() => 504,
            BookingError::RequestError(_) => 502,
            BookingError::ApiError { status_code, .. } => *status_code,
            BookingError::UnexpectedPayload(_) => 502,
            BookingError::ParseError(_) => 502,
            BookingError::ConfigError(_) => 500,
        }
    }
}

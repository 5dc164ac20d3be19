// --- File: crates/eventdash_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, validation_error, Context,
    EventdashError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::create_client_with_headers,
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{Booking, EventSnapshot};
pub use services::{BookingService, BoxFuture, BoxedError, SessionProvider, SessionStatus, SessionUser};

// This crate provides common functionality that can be used across the application.
// It includes shared models, service traits, error handling, HTTP and logging utilities.

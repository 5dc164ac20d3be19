use reqwest::{header::HeaderMap, Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Creates a new HTTP client with custom configuration.
///
/// Used to forward the session cookie or bearer token to upstream services.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client; `0` falls back to [`DEFAULT_TIMEOUT_SECS`]
/// * `follow_redirects` - Whether the client should follow redirects
/// * `default_headers` - Headers sent with every request
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client_with_headers(
    timeout_secs: u64,
    follow_redirects: bool,
    default_headers: HeaderMap,
) -> Result<Client, ReqwestError> {
    let timeout_secs = if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(default_headers)
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

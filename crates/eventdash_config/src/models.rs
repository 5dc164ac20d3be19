// --- File: crates/eventdash_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Booking Service Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingsConfig {
    /// Base URL of the booking service, e.g. `https://events.example.com`.
    pub base_url: String,
    /// Timeout applied by the HTTP client to every request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound for a single cancellation; `0` disables the bound.
    #[serde(default = "default_cancel_timeout_secs")]
    pub cancel_timeout_secs: u64,
    /// Suffix appended to formatted amounts on the dashboard.
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cancel_timeout_secs() -> u64 {
    30
}

fn default_currency_suffix() -> String {
    "TK".to_string()
}

impl Default for BookingsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            cancel_timeout_secs: default_cancel_timeout_secs(),
            currency_suffix: default_currency_suffix(),
        }
    }
}

// --- Session Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Ask the identity provider's session endpoint on every request.
    #[default]
    Http,
    /// Use the user configured below; no identity provider involved.
    Static,
}

// Cookie and bearer token are usually set to "secret_from_env".
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default)]
    pub mode: SessionMode,
    /// Path of the identity provider's session endpoint, relative to `bookings.base_url`.
    #[serde(default = "default_session_endpoint")]
    pub endpoint: String,
    /// Display name used in `static` mode. Without it the static session is unauthenticated.
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
}

fn default_session_endpoint() -> String {
    "/api/auth/session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::default(),
            endpoint: default_session_endpoint(),
            user_name: None,
            cookie: None,
            bearer_token: None,
        }
    }
}

// --- Front-end Routes ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    #[serde(default = "default_home_route")]
    pub home: String,
    #[serde(default = "default_sign_in_route")]
    pub sign_in: String,
    #[serde(default = "default_dashboard_route")]
    pub dashboard: String,
    #[serde(default = "default_events_route")]
    pub events: String,
}

fn default_home_route() -> String {
    "/".to_string()
}

fn default_sign_in_route() -> String {
    "/auth/signin".to_string()
}

fn default_dashboard_route() -> String {
    "/dashboard".to_string()
}

fn default_events_route() -> String {
    "/events".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: default_home_route(),
            sign_in: default_sign_in_route(),
            dashboard: default_dashboard_route(),
            events: default_events_route(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // Booking service config is mandatory
    pub bookings: BookingsConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub routes: RoutesConfig,
}

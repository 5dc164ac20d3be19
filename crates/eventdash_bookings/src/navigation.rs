// --- File: crates/eventdash_bookings/src/navigation.rs ---
use eventdash_config::RoutesConfig;

/// Places the front-end can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    Dashboard,
    Events,
    EventDetails(String),
}

/// Navigation capability: turns a [`Route`] into the front-end path to use.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    routes: RoutesConfig,
}

impl Navigation {
    pub fn new(routes: RoutesConfig) -> Self {
        Self { routes }
    }

    pub fn href(&self, route: &Route) -> String {
        match route {
            Route::Home => self.routes.home.clone(),
            Route::SignIn => self.routes.sign_in.clone(),
            Route::Dashboard => self.routes.dashboard.clone(),
            Route::Events => self.routes.events.clone(),
            Route::EventDetails(event_id) => format!(
                "{}/{}",
                self.routes.events.trim_end_matches('/'),
                urlencoding::encode(event_id)
            ),
        }
    }
}

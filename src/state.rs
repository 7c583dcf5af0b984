//! Shared application state.
//!
//! Bundles everything a front end needs: the loaded configuration, the session
//! manager and the route guard built from the routing config.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::ConfigV1;
use crate::session::{Notifier, SessionManager};
use crate::store::create_store;
use crate::ui::RouteGuard;

/// Application state shared by every command or view.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session manager wrapping the API client and token store.
    pub session: Arc<SessionManager>,
    /// Guard for routes that need a logged-in session.
    pub guard: RouteGuard,
}

impl AppState {
    /// Wires the store, API client and session manager described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn build(config: Arc<ConfigV1>, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let store = create_store(&config.store);
        let api = ApiClient::new(&config.api)?;
        let session = Arc::new(SessionManager::new(api, store, notifier));
        let guard = RouteGuard::from_config(&config.routes);

        Ok(AppState {
            config,
            session,
            guard,
        })
    }
}

use crate::api::ApiClient;
use crate::bookmarks::BrowserBookmarks;
use crate::config::EnvConfig;
use crate::dashboard::DashboardController;
use leptos::prelude::*;

/// Notes and user info both come from the same API client.
pub(crate) type AppDashboard = DashboardController<ApiClient, ApiClient, BrowserBookmarks>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub dashboard: StoredValue<AppDashboard>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        tracing::debug!(api_url = %config.api_url, "using notes API");

        let api_client = ApiClient::load_from_storage(&config);
        let bookmarks = BrowserBookmarks::open();

        Self {
            dashboard: StoredValue::new(DashboardController::new(
                api_client.clone(),
                api_client,
                bookmarks,
            )),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

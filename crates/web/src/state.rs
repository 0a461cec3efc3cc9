//! Application state shared across handlers.

use std::sync::Arc;

use crate::api_client::ApiClient;
use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    api: ApiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebConfig, api: ApiClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the menu API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::MenuItemStore;
use crate::services::MenuItemService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the menu item service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    menu_items: MenuItemService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `store` - Menu item store the service will use for every request
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn MenuItemStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                menu_items: MenuItemService::new(store),
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the menu item service.
    #[must_use]
    pub fn menu_items(&self) -> &MenuItemService {
        &self.inner.menu_items
    }
}

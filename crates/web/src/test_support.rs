//! Helpers shared by the web client's tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use url::Url;

use allergen_menu_api::config::ApiConfig;
use allergen_menu_api::db::InMemoryMenuItemStore;
use allergen_menu_api::routes;
use allergen_menu_api::state::AppState as ApiState;

use crate::api_client::ApiClient;

/// Serve an in-memory API on an ephemeral port and return its base URL.
pub async fn spawn_api_url() -> Url {
    let state = ApiState::new(
        ApiConfig::in_memory(),
        Arc::new(InMemoryMenuItemStore::new()),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes::app(state)).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/api/")).unwrap()
}

/// Serve an in-memory API and return a client for it.
pub async fn spawn_api() -> ApiClient {
    ApiClient::new(&spawn_api_url().await).unwrap()
}

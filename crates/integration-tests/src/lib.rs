//! Integration tests for Allergen Menu.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API (in-memory store is enough)
//! MENU_STORE=memory cargo run -p allergen-menu-api
//!
//! # Run integration tests
//! cargo test -p allergen-menu-integration-tests -- --ignored
//! ```
//!
//! Set `MENU_API_BASE_URL` to point at a server other than
//! `http://localhost:5000`.

use reqwest::Client;
use serde_json::Value;

/// Base URL for the menu API server (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("MENU_API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Collection endpoint URL.
#[must_use]
pub fn menu_items_url() -> String {
    format!("{}/api/menu-items", api_base_url())
}

/// Single item endpoint URL.
#[must_use]
pub fn menu_item_url(id: &str) -> String {
    format!("{}/{id}", menu_items_url())
}

/// Create a menu item and return the created JSON, panicking on failure.
///
/// # Panics
///
/// Panics if the request fails or the API does not answer 201.
pub async fn create_item(client: &Client, body: &Value) -> Value {
    let resp = client
        .post(menu_items_url())
        .json(body)
        .send()
        .await
        .expect("Failed to create menu item");
    assert_eq!(resp.status(), 201, "create should answer 201");
    resp.json().await.expect("Failed to parse created item")
}

/// Delete a menu item, ignoring the outcome.
pub async fn delete_item(client: &Client, id: &str) {
    let _ = client.delete(menu_item_url(id)).send().await;
}

//! HTTP client for the menu API.
//!
//! The web client never touches the store directly; every read and write
//! goes through these calls.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use allergen_menu_core::{MenuItem, MenuItemId, MenuItemPayload};

/// Errors that can occur when calling the menu API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Menu API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g.
    /// `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/menu-items", self.base_url)
    }

    fn item_url(&self, id: MenuItemId) -> String {
        format!("{}/menu-items/{id}", self.base_url)
    }

    /// All menu items, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MenuItem>, ApiError> {
        let response = self.client.get(self.collection_url()).send().await?;
        read_json(response).await
    }

    /// One menu item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 404 if the item does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, ApiError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        read_json(response).await
    }

    /// Create a menu item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 400 if the API rejects the payload.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &MenuItemPayload) -> Result<MenuItem, ApiError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    /// Apply a partial update to a menu item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` if the item is missing or the payload invalid.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: MenuItemId,
        payload: &MenuItemPayload,
    ) -> Result<MenuItem, ApiError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 404 if the item does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: MenuItemId) -> Result<(), ApiError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        let _: serde_json::Value = read_json(response).await?;
        Ok(())
    }
}

/// Decode a 2xx JSON body, or turn the API's `{message}` body into an error.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| status.to_string(), |body| body.message);
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use allergen_menu_core::{Allergen, Allergens};

    use super::*;
    use crate::test_support::spawn_api;

    fn payload(value: serde_json::Value) -> MenuItemPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = ApiClient::new(&Url::parse("http://localhost:5000/api/").unwrap()).unwrap();
        assert_eq!(client.collection_url(), "http://localhost:5000/api/menu-items");

        let id = MenuItemId::generate();
        assert_eq!(
            client.item_url(id),
            format!("http://localhost:5000/api/menu-items/{id}")
        );
    }

    #[tokio::test]
    async fn test_crud_against_running_api() {
        let client = spawn_api().await;

        let created = client
            .create(&payload(json!({
                "name": "Soup",
                "price": "5",
                "allergens": {"dairy": true}
            })))
            .await
            .unwrap();
        assert_eq!(created.allergens, Allergens::with(&[Allergen::Dairy]));

        let updated = client
            .update(created.id, &payload(json!({"price": 6})))
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::from(6));
        assert_eq!(updated.name, "Soup");

        assert_eq!(client.list().await.unwrap(), vec![updated.clone()]);
        assert_eq!(client.get(created.id).await.unwrap(), updated);

        client.delete(created.id).await.unwrap();
        let err = client.get(created.id).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { status: 404, ref message } if message == "Menu item not found"
        ));
    }

    #[tokio::test]
    async fn test_validation_message_is_surfaced() {
        let client = spawn_api().await;

        let err = client
            .create(&payload(json!({"name": "Soup"})))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Api { status: 400, ref message } if message == "Valid price is required"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_http_error() {
        // Bind then drop so nothing listens on the port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&Url::parse(&format!("http://{addr}/api")).unwrap()).unwrap();
        assert!(matches!(client.list().await, Err(ApiError::Http(_))));
    }
}

//! Menu item service.
//!
//! Turns validated input into store operations and owns the timestamp
//! policy: `created_at` is set once, `updated_at` is refreshed on every
//! successful update.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use allergen_menu_core::{MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem};

use crate::db::{MenuItemStore, RepositoryError};

/// Errors returned by [`MenuItemService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No item with this ID exists.
    #[error("menu item {0} not found")]
    NotFound(MenuItemId),

    /// The store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Menu item operations over an injected store.
#[derive(Clone)]
pub struct MenuItemService {
    store: Arc<dyn MenuItemStore>,
}

impl MenuItemService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn MenuItemStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn MenuItemStore {
        self.store.as_ref()
    }

    /// All menu items, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, ServiceError> {
        Ok(self.store.list().await?)
    }

    /// One menu item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no item has this ID.
    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, ServiceError> {
        self.store
            .find(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Store a new menu item stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store rejects the insert.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create(&self, item: NewMenuItem) -> Result<MenuItem, ServiceError> {
        let created = self.store.insert(item, Utc::now()).await?;
        tracing::info!(item_id = %created.id, backend = self.store.backend_tag(), "Menu item created");
        Ok(created)
    }

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the item does not exist (or is
    /// deleted before the write lands).
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, ServiceError> {
        if update.is_empty() {
            tracing::debug!(item_id = %id, "Update supplies no fields; refreshing updated_at only");
        }

        let mut item = self.get(id).await?;
        item.apply_update(update);
        item.updated_at = Utc::now().max(item.updated_at);

        let saved = self.store.save(&item).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::NotFound(id),
            other => ServiceError::Repository(other),
        })?;
        tracing::info!(item_id = %id, "Menu item updated");
        Ok(saved)
    }

    /// Remove a menu item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the item does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: MenuItemId) -> Result<(), ServiceError> {
        if self.store.delete(id).await? {
            tracing::info!(item_id = %id, "Menu item deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(id))
        }
    }
}

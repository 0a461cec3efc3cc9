//! In-memory menu item store.
//!
//! Data lives only as long as the process. Listing order matches the
//! `PostgreSQL` store: newest `created_at` first, ties broken by insertion
//! order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use allergen_menu_core::{MenuItem, MenuItemId, NewMenuItem};

use super::{MenuItemStore, RepositoryError};

struct StoredItem {
    position: u64,
    item: MenuItem,
}

/// Process-local menu item store.
#[derive(Default)]
pub struct InMemoryMenuItemStore {
    items: RwLock<HashMap<MenuItemId, StoredItem>>,
    next_position: AtomicU64,
}

impl InMemoryMenuItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl MenuItemStore for InMemoryMenuItemStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let items = self.items.read().await;
        let mut stored: Vec<&StoredItem> = items.values().collect();
        stored.sort_by(|a, b| {
            b.item
                .created_at
                .cmp(&a.item.created_at)
                .then(b.position.cmp(&a.position))
        });
        Ok(stored.into_iter().map(|s| s.item.clone()).collect())
    }

    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        Ok(self.items.read().await.get(&id).map(|s| s.item.clone()))
    }

    async fn insert(
        &self,
        item: NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Result<MenuItem, RepositoryError> {
        let record = MenuItem {
            id: MenuItemId::generate(),
            name: item.name,
            description: item.description,
            price: item.price,
            allergens: item.allergens,
            created_at,
            updated_at: created_at,
        };
        let position = self.next_position.fetch_add(1, Ordering::Relaxed);

        self.items.write().await.insert(
            record.id,
            StoredItem {
                position,
                item: record.clone(),
            },
        );
        Ok(record)
    }

    async fn save(&self, item: &MenuItem) -> Result<MenuItem, RepositoryError> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(&item.id).ok_or(RepositoryError::NotFound)?;

        // created_at is immutable once stored
        stored.item = MenuItem {
            created_at: stored.item.created_at,
            ..item.clone()
        };
        Ok(stored.item.clone())
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, RepositoryError> {
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use allergen_menu_core::Allergens;
    use chrono::Duration;
    use rust_decimal::Decimal;

    use super::*;

    fn new_item(name: &str) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            description: None,
            price: Decimal::new(5, 0),
            allergens: Allergens::NONE,
        }
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = InMemoryMenuItemStore::new();
        let t0 = Utc::now();
        store.insert(new_item("middle"), t0).await.unwrap();
        store
            .insert(new_item("oldest"), t0 - Duration::seconds(10))
            .await
            .unwrap();
        store
            .insert(new_item("newest"), t0 + Duration::seconds(10))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_list_breaks_timestamp_ties_by_insertion() {
        let store = InMemoryMenuItemStore::new();
        let t0 = Utc::now();
        store.insert(new_item("first"), t0).await.unwrap();
        store.insert(new_item("second"), t0).await.unwrap();
        assert_eq!(store.len().await, 2);

        let items = store.list().await.unwrap();
        assert_eq!(items[0].name, "second");
        assert_eq!(items[1].name, "first");
    }

    #[tokio::test]
    async fn test_save_missing_item_is_not_found() {
        let store = InMemoryMenuItemStore::new();
        let mut item = store.insert(new_item("Soup"), Utc::now()).await.unwrap();
        assert!(store.delete(item.id).await.unwrap());

        item.name = "Stew".to_string();
        let err = store.save(&item).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_keeps_created_at() {
        let store = InMemoryMenuItemStore::new();
        let original = store.insert(new_item("Soup"), Utc::now()).await.unwrap();

        let mut changed = original.clone();
        changed.created_at = original.created_at + Duration::days(1);
        changed.name = "Stew".to_string();
        let saved = store.save(&changed).await.unwrap();

        assert_eq!(saved.name, "Stew");
        assert_eq!(saved.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = InMemoryMenuItemStore::new();
        let item = store.insert(new_item("Soup"), Utc::now()).await.unwrap();
        assert!(store.delete(item.id).await.unwrap());
        assert!(!store.delete(item.id).await.unwrap());
    }
}

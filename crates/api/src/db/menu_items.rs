//! `PostgreSQL` menu item store.
//!
//! Queries are checked at runtime (`query_as::<_, Row>`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use allergen_menu_core::{Allergens, MenuItem, MenuItemId, NewMenuItem};

use super::{MenuItemStore, RepositoryError};

const COLUMNS: &str = "id, name, description, price, allergens, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for menu item queries.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    allergens: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = RepositoryError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let allergens: Allergens = serde_json::from_value(row.allergens).map_err(|e| {
            RepositoryError::DataCorruption(format!("menu item {} allergens: {e}", row.id))
        })?;

        Ok(Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            allergens,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Menu item store backed by the `menu_items` table.
#[derive(Clone)]
pub struct PgMenuItemStore {
    pool: PgPool,
}

impl PgMenuItemStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuItemStore for PgMenuItemStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items ORDER BY created_at DESC, position DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn insert(
        &self,
        item: NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            r"
            INSERT INTO menu_items (name, description, price, allergens, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {COLUMNS}
            "
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(Json(item.allergens))
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn save(&self, item: &MenuItem) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            r"
            UPDATE menu_items
            SET name = $2, description = $3, price = $4, allergens = $5, updated_at = $6
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(Json(item.allergens))
        .bind(item.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

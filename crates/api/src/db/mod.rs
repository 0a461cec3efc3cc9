//! Persistence for menu items.
//!
//! # Database: `allergen_menu`
//!
//! ## Tables
//!
//! - `menu_items` - One row per menu item; allergen flags stored as JSONB
//!
//! # Backends
//!
//! Handlers never see a concrete backend. They go through [`MenuItemStore`],
//! which has two implementations:
//!
//! - [`PgMenuItemStore`] - `PostgreSQL` via a shared `PgPool`
//! - [`InMemoryMenuItemStore`] - process-local map, used by tests and by
//!   `MENU_STORE=memory`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p allergen-menu-cli -- migrate
//! ```

pub mod memory;
pub mod menu_items;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use allergen_menu_core::{MenuItem, MenuItemId, NewMenuItem};

pub use memory::InMemoryMenuItemStore;
pub use menu_items::PgMenuItemStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Storage operations for menu items.
///
/// Every method touches at most one record, so backends only need
/// single-record atomicity.
#[async_trait]
pub trait MenuItemStore: Send + Sync + 'static {
    /// Short backend name for logs.
    fn backend_tag(&self) -> &'static str;

    /// All items, newest `created_at` first.
    async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError>;

    /// One item by ID.
    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError>;

    /// Insert a new item. The store assigns the ID; both timestamps are set
    /// to `created_at`.
    async fn insert(
        &self,
        item: NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Result<MenuItem, RepositoryError>;

    /// Overwrite the mutable fields of an existing item.
    ///
    /// Returns `RepositoryError::NotFound` if the item no longer exists.
    async fn save(&self, item: &MenuItem) -> Result<MenuItem, RepositoryError>;

    /// Remove an item. Returns `false` if there was nothing to remove.
    async fn delete(&self, id: MenuItemId) -> Result<bool, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! menu-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MENU_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/`, named
//! `<timestamp>_<description>.sql`, and are applied in order.

use super::{CommandError, connect};

/// Run menu database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running menu migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Menu migrations complete!");
    pool.close().await;
    Ok(())
}

//! CLI command implementations.

pub mod list;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use allergen_menu_api::db::{self, RepositoryError};
use allergen_menu_api::services::ServiceError;
use allergen_menu_core::ValidationError;

/// Errors from any CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid seed data: {0}")]
    SeedData(#[from] serde_json::Error),

    #[error("Seed item '{name}' is invalid: {source}")]
    InvalidSeed {
        name: String,
        source: ValidationError,
    },

    #[error("Store error: {0}")]
    Service(#[from] ServiceError),
}

impl From<RepositoryError> for CommandError {
    fn from(err: RepositoryError) -> Self {
        Self::Service(ServiceError::Repository(err))
    }
}

/// Read `MENU_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("MENU_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("MENU_DATABASE_URL"))
}

/// Connect to the menu database.
async fn connect() -> Result<PgPool, CommandError> {
    let pool = db::create_pool(&database_url()?).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}

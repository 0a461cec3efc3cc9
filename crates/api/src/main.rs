//! Allergen Menu API - REST service for menu items and their allergens.
//!
//! This binary serves the JSON API on port 5000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` for menu item storage (or an in-memory store for demos)
//! - Sentry for error tracking, `tracing` for structured logs
//!
//! The browser client lives in the `allergen-menu-web` binary and reaches
//! this service only over HTTP.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allergen_menu_api::config::{ApiConfig, StoreBackend};
use allergen_menu_api::db::{self, InMemoryMenuItemStore, MenuItemStore, PgMenuItemStore};
use allergen_menu_api::routes;
use allergen_menu_api::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "allergen_menu_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p allergen-menu-cli -- migrate
    let (store, pool): (Arc<dyn MenuItemStore>, _) = match config.store {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .expect("MENU_DATABASE_URL is required for the postgres store");
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");
            (Arc::new(PgMenuItemStore::new(pool.clone())), Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; menu items are lost on restart");
            (Arc::new(InMemoryMenuItemStore::new()), None)
        }
    };

    let state = AppState::new(config.clone(), store);

    let app = routes::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

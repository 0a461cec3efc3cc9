//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (store reachable)
//!
//! # Menu items
//! GET    /api/menu-items        - List, newest first
//! POST   /api/menu-items        - Create
//! GET    /api/menu-items/{id}   - Fetch one
//! PUT    /api/menu-items/{id}   - Partial update
//! DELETE /api/menu-items/{id}   - Delete
//! ```
//!
//! Unknown paths answer 404 with a JSON `message`. A panic in any handler is
//! caught and answered with a generic 500.

pub mod health;
pub mod menu_items;

use std::any::Any;

use axum::{
    Json, Router,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::{ErrorBody, PANIC_MESSAGE};
use crate::state::AppState;

/// Build the application router with all middleware except Sentry.
///
/// The binary adds the Sentry layers on top so tests can use this directly.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(menu_items::router())
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
}

/// CORS policy: any origin unless `MENU_CORS_ORIGINS` narrows it.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.cors_origins.is_empty() {
        AllowOrigin::from(AnyOrigin)
    } else {
        AllowOrigin::list(config.cors_origins.clone())
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}

/// Convert a handler panic into a generic 500. The detail is logged only.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    let event_id = sentry::capture_message(detail, sentry::Level::Fatal);
    tracing::error!(panic = %detail, sentry_event_id = %event_id, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(PANIC_MESSAGE)),
    )
        .into_response()
}

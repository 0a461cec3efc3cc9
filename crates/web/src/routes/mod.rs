//! HTTP route handlers for the web client.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (menu API reachable)
//!
//! GET    /                     - Form and item list
//! POST   /items                - Submit the form (create or update)
//! POST   /items/cancel         - Abandon the current edit
//! POST   /items/{id}/edit      - Load an item into the form
//! POST   /items/{id}/delete    - Delete an item
//! POST   /status/dismiss       - Clear the status line
//! ```
//!
//! Every POST redirects back to `/`, which re-reads the whole list.

pub mod health;
pub mod menu;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::session::create_session_layer;
use crate::state::AppState;

/// Build the application router with all middleware except Sentry.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(menu::router())
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

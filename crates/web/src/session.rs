//! Session layer and page state persistence.
//!
//! Sessions live in process memory; a restart forgets every draft.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::WebConfig;
use crate::form::PageState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "menu_session";

/// Session key for [`PageState`].
const PAGE_STATE_KEY: &str = "menu_page";

/// Session expiry time in seconds (1 day).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &WebConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the page state, starting fresh if there is none.
///
/// # Errors
///
/// Returns error if the session store cannot be read.
pub async fn load_page(session: &Session) -> Result<PageState, tower_sessions::session::Error> {
    Ok(session
        .get::<PageState>(PAGE_STATE_KEY)
        .await?
        .unwrap_or_default())
}

/// Persist the page state.
///
/// # Errors
///
/// Returns error if the session store cannot be written.
pub async fn save_page(
    session: &Session,
    page: &PageState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(PAGE_STATE_KEY, page).await
}

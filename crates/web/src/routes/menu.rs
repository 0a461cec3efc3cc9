//! Menu page and form actions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tower_sessions::Session;
use tracing::instrument;

use allergen_menu_core::{Allergen, MenuItem, MenuItemId};

use crate::error::Result;
use crate::filters;
use crate::form::{FormMode, MenuForm, PageState, StatusMessage};
use crate::session::{load_page, save_page};
use crate::state::AppState;

/// Build the menu page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/items", post(submit))
        .route("/items/cancel", post(cancel))
        .route("/items/{id}/edit", post(edit))
        .route("/items/{id}/delete", post(delete))
        .route("/status/dismiss", post(dismiss))
}

/// One allergen checkbox.
#[derive(Debug, Clone)]
pub struct AllergenOption {
    pub key: &'static str,
    pub checked: bool,
}

/// Menu item for display.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub allergens: Vec<Allergen>,
}

impl From<&MenuItem> for ItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            allergens: item.allergens.present().collect(),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub editing: bool,
    pub form: MenuForm,
    pub allergen_options: Vec<AllergenOption>,
    pub status: Option<StatusMessage>,
    pub items: Vec<ItemView>,
}

impl IndexTemplate {
    /// Render the page for `page`. `status` overrides the stored status line.
    #[must_use]
    pub fn new(page: &PageState, items: Vec<ItemView>, status: Option<StatusMessage>) -> Self {
        let allergen_options = Allergen::ALL
            .into_iter()
            .map(|a| AllergenOption {
                key: a.key(),
                checked: page.form.allergens.contains(a),
            })
            .collect();

        Self {
            heading: page.heading(),
            submit_label: page.submit_label(),
            editing: page.is_editing(),
            form: page.form.clone(),
            allergen_options,
            status: status.or_else(|| page.status.clone()),
            items,
        }
    }
}

/// Display the form and the full item list.
///
/// GET /
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<IndexTemplate> {
    let page = load_page(&session).await?;

    let (items, load_error) = match state.api().list().await {
        Ok(items) => (items.iter().map(ItemView::from).collect(), None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load menu items");
            (
                Vec::new(),
                Some(StatusMessage::error("Failed to load menu items")),
            )
        }
    };

    Ok(IndexTemplate::new(&page, items, load_error))
}

/// Create or update from the submitted form.
///
/// POST /items
#[instrument(skip(state, session, fields))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let mut page = load_page(&session).await?;

    if page.accept_draft(MenuForm::from_fields(&fields)) {
        let payload = page.form.to_payload();
        let outcome = match page.mode {
            FormMode::Creating => state.api().create(&payload).await,
            FormMode::Editing(id) => state.api().update(id, &payload).await,
        };

        match &outcome {
            Ok(item) => tracing::info!(item_id = %item.id, "Menu item saved"),
            Err(e) => tracing::warn!(error = %e, "Menu item submit failed"),
        }
        page.finish_submit(outcome.is_ok());
    }

    save_page(&session, &page).await?;
    Ok(Redirect::to("/"))
}

/// Load an item into the form for editing.
///
/// POST /items/{id}/edit
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let mut page = load_page(&session).await?;

    let item = match id.parse::<MenuItemId>() {
        Ok(id) => state.api().get(id).await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match item {
        Ok(item) => page.begin_edit(&item),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load menu item for editing");
            page.status = Some(StatusMessage::error("Failed to load menu item"));
        }
    }

    save_page(&session, &page).await?;
    Ok(Redirect::to("/"))
}

/// Abandon the current edit.
///
/// POST /items/cancel
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Redirect> {
    let mut page = load_page(&session).await?;
    page.cancel();
    save_page(&session, &page).await?;
    Ok(Redirect::to("/"))
}

/// Delete an item.
///
/// POST /items/{id}/delete
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let mut page = load_page(&session).await?;

    match id.parse::<MenuItemId>() {
        Ok(id) => {
            let outcome = state.api().delete(id).await;
            if let Err(e) = &outcome {
                tracing::warn!(item_id = %id, error = %e, "Menu item delete failed");
            }
            page.finish_delete(id, outcome.is_ok());
        }
        Err(e) => {
            tracing::warn!(error = %e, "Menu item delete failed");
            page.status = Some(StatusMessage::error("Failed to delete item"));
        }
    }

    save_page(&session, &page).await?;
    Ok(Redirect::to("/"))
}

/// Clear the status line.
///
/// POST /status/dismiss
#[instrument(skip(session))]
pub async fn dismiss(session: Session) -> Result<Redirect> {
    let mut page = load_page(&session).await?;
    page.dismiss_status();
    save_page(&session, &page).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use tower::ServiceExt;
    use url::Url;

    use allergen_menu_core::Allergens;

    use super::*;
    use crate::api_client::ApiClient;
    use crate::config::WebConfig;
    use crate::routes::app;
    use crate::test_support::spawn_api_url;

    fn web_config(api_url: Url) -> WebConfig {
        WebConfig {
            api_url,
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    async fn web_app() -> (Router, ApiClient) {
        let api_url = spawn_api_url().await;
        let api = ApiClient::new(&api_url).unwrap();
        (app(AppState::new(web_config(api_url), api.clone())), api)
    }

    /// Minimal cookie-carrying browser for oneshot requests.
    struct Browser {
        app: Router,
        cookie: Option<String>,
    }

    impl Browser {
        async fn post(&mut self, uri: &str, body: &str) -> StatusCode {
            let mut request = Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let response = self
                .app
                .clone()
                .oneshot(request.body(Body::from(body.to_string())).unwrap())
                .await
                .unwrap();

            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/",
                "{uri} should redirect home"
            );
            response.status()
        }

        async fn page(&self) -> String {
            let mut request = Request::builder().uri("/");
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let response = self
                .app
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            String::from_utf8(bytes.to_vec()).unwrap()
        }
    }

    #[test]
    fn test_template_renders_items_and_status() {
        let now = Utc::now();
        let item = MenuItem {
            id: MenuItemId::generate(),
            name: "Fish & Chips".to_string(),
            description: Some("Battered cod".to_string()),
            price: Decimal::new(1250, 2),
            allergens: Allergens::with(&[Allergen::Fish, Allergen::Gluten]),
            created_at: now,
            updated_at: now,
        };
        let page = PageState {
            status: Some(StatusMessage::error("Failed to add item")),
            ..PageState::default()
        };

        let html = IndexTemplate::new(&page, vec![ItemView::from(&item)], None)
            .render()
            .unwrap();

        assert!(html.contains("Add New Menu Item"));
        assert!(html.contains("Fish &#38; Chips"));
        assert!(!html.contains("Fish & Chips"));
        assert!(html.contains("Battered cod"));
        assert!(html.contains("$12.50"));
        assert!(html.contains("Gluten"));
        assert!(html.contains("Fish"));
        assert!(html.contains("Failed to add item"));
        assert!(html.contains(&format!("/items/{}/edit", item.id)));
    }

    #[tokio::test]
    async fn test_add_edit_delete_flow() {
        let (app, api) = web_app().await;
        let mut browser = Browser { app, cookie: None };

        let status = browser
            .post("/items", "name=Soup&description=&price=5&allergen=dairy")
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let html = browser.page().await;
        assert!(html.contains("Item added successfully"));
        assert!(html.contains("Soup"));
        assert!(html.contains("$5.00"));
        assert!(html.contains("Dairy"));

        let id = api.list().await.unwrap()[0].id;
        browser.post(&format!("/items/{id}/edit"), "").await;
        let html = browser.page().await;
        assert!(html.contains("Edit Menu Item"));
        assert!(html.contains("value=\"Soup\""));

        browser
            .post("/items", "name=Soup&description=&price=6&allergen=dairy")
            .await;
        let html = browser.page().await;
        assert!(html.contains("Item updated successfully"));
        assert!(html.contains("Add New Menu Item"));
        assert!(html.contains("$6.00"));
        assert_eq!(api.list().await.unwrap().len(), 1);

        browser.post(&format!("/items/{id}/delete"), "").await;
        let html = browser.page().await;
        assert!(html.contains("Item deleted successfully"));
        assert!(api.list().await.unwrap().is_empty());

        browser.post("/status/dismiss", "").await;
        assert!(!browser.page().await.contains("Item deleted successfully"));
    }

    #[tokio::test]
    async fn test_missing_required_fields_sends_nothing() {
        let (app, api) = web_app().await;
        let mut browser = Browser { app, cookie: None };

        browser.post("/items", "name=Soup&price=").await;

        let html = browser.page().await;
        assert!(html.contains("Please fill in all required fields"));
        assert!(html.contains("value=\"Soup\""));
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_draft() {
        let (app, _api) = web_app().await;
        let mut browser = Browser { app, cookie: None };

        browser.post("/items", "name=Soup&price=-2").await;

        let html = browser.page().await;
        assert!(html.contains("Failed to add item"));
        assert!(html.contains("value=\"-2\""));
    }

    #[tokio::test]
    async fn test_cancel_and_bad_ids() {
        let (app, api) = web_app().await;
        let mut browser = Browser { app, cookie: None };

        browser.post("/items", "name=Tea&price=2").await;
        let id = api.list().await.unwrap()[0].id;

        browser.post(&format!("/items/{id}/edit"), "").await;
        browser.post("/items/cancel", "").await;
        assert!(browser.page().await.contains("Add New Menu Item"));

        browser.post("/items/not-an-id/delete", "").await;
        assert!(browser.page().await.contains("Failed to delete item"));

        browser
            .post(&format!("/items/{}/edit", MenuItemId::generate()), "")
            .await;
        assert!(browser.page().await.contains("Failed to load menu item"));
    }

    #[tokio::test]
    async fn test_unreachable_api_shows_load_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api_url = Url::parse(&format!("http://{addr}/api")).unwrap();
        let api = ApiClient::new(&api_url).unwrap();
        let browser = Browser {
            app: app(AppState::new(web_config(api_url), api)),
            cookie: None,
        };

        assert!(browser.page().await.contains("Failed to load menu items"));
    }
}

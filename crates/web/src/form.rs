//! Per-browser form state.
//!
//! The page is a single form that is either creating a new item or editing
//! an existing one, plus one transient status line. All of it lives in the
//! session between requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use allergen_menu_core::{Allergen, Allergens, MenuItem, MenuItemId, MenuItemPayload};

/// Form field carrying one checked allergen key. Repeated per checkbox.
pub const ALLERGEN_FIELD: &str = "allergen";

/// Draft contents of the menu item form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub allergens: Allergens,
}

impl MenuForm {
    /// Build a draft from submitted `application/x-www-form-urlencoded` pairs.
    ///
    /// Unchecked boxes are simply absent. Unknown allergen keys are ignored.
    #[must_use]
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let mut form = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "name" => form.name.clone_from(value),
                "description" => form.description.clone_from(value),
                "price" => form.price.clone_from(value),
                ALLERGEN_FIELD => {
                    if let Some(allergen) = Allergen::from_key(value) {
                        form.allergens.set(allergen, true);
                    }
                }
                _ => {}
            }
        }
        form
    }

    /// Pre-fill the form with a stored item.
    #[must_use]
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.normalize().to_string(),
            allergens: item.allergens,
        }
    }

    /// Name and price are required before anything is sent to the API.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.price.trim().is_empty()
    }

    /// Request body for create or update. Every field is sent, so an update
    /// from the form replaces the whole record.
    #[must_use]
    pub fn to_payload(&self) -> MenuItemPayload {
        let allergens: Map<String, Value> = Allergen::ALL
            .into_iter()
            .map(|a| (a.key().to_string(), Value::Bool(self.allergens.contains(a))))
            .collect();

        MenuItemPayload {
            name: Some(Value::String(self.name.clone())),
            description: Some(Value::String(self.description.clone())),
            price: Some(Value::String(self.price.trim().to_string())),
            allergens: Some(Value::Object(allergens)),
        }
    }
}

/// What a form submission will do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(MenuItemId),
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient status line shown above the item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Whether this is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, StatusKind::Error)
    }
}

/// Everything the page remembers between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub form: MenuForm,
    pub mode: FormMode,
    pub status: Option<StatusMessage>,
}

impl PageState {
    /// Whether the form is editing an existing item.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Form heading for the current mode.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Add New Menu Item",
            FormMode::Editing(_) => "Edit Menu Item",
        }
    }

    /// Submit button label for the current mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Add Item",
            FormMode::Editing(_) => "Update Item",
        }
    }

    /// Replace the draft with a submitted one. Returns `false` and sets the
    /// status if a required field is missing.
    pub fn accept_draft(&mut self, form: MenuForm) -> bool {
        self.form = form;
        if self.form.has_required_fields() {
            true
        } else {
            self.status = Some(StatusMessage::info("Please fill in all required fields"));
            false
        }
    }

    /// Record the outcome of a create or update for the current mode.
    ///
    /// Success clears the draft and returns to creating. Failure keeps the
    /// draft and the mode so the user can retry.
    pub fn finish_submit(&mut self, succeeded: bool) {
        let editing = self.is_editing();
        if succeeded {
            self.form = MenuForm::default();
            self.mode = FormMode::Creating;
            self.status = Some(StatusMessage::info(if editing {
                "Item updated successfully"
            } else {
                "Item added successfully"
            }));
        } else {
            self.status = Some(StatusMessage::error(if editing {
                "Failed to update item"
            } else {
                "Failed to add item"
            }));
        }
    }

    /// Start editing a stored item.
    pub fn begin_edit(&mut self, item: &MenuItem) {
        self.form = MenuForm::from_item(item);
        self.mode = FormMode::Editing(item.id);
    }

    /// Drop the draft and go back to creating.
    pub fn cancel(&mut self) {
        self.form = MenuForm::default();
        self.mode = FormMode::Creating;
    }

    /// Record the outcome of a delete. Deleting the item being edited also
    /// abandons the edit.
    pub fn finish_delete(&mut self, id: MenuItemId, succeeded: bool) {
        if succeeded {
            if self.mode == FormMode::Editing(id) {
                self.cancel();
            }
            self.status = Some(StatusMessage::info("Item deleted successfully"));
        } else {
            self.status = Some(StatusMessage::error("Failed to delete item"));
        }
    }

    /// Clear the status line.
    pub fn dismiss_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use allergen_menu_core::validate_new_item;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn stored_soup() -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: MenuItemId::generate(),
            name: "Soup".to_string(),
            description: None,
            price: Decimal::new(550, 2),
            allergens: Allergens::with(&[Allergen::Dairy, Allergen::Gluten]),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_from_fields_collects_checked_allergens() {
        let form = MenuForm::from_fields(&fields(&[
            ("name", "Soup"),
            ("description", "Hot"),
            ("price", "5"),
            ("allergen", "dairy"),
            ("allergen", "sesame"),
            ("allergen", "celery"),
        ]));

        assert_eq!(form.name, "Soup");
        assert_eq!(form.description, "Hot");
        assert_eq!(form.price, "5");
        assert_eq!(
            form.allergens,
            Allergens::with(&[Allergen::Dairy, Allergen::Sesame])
        );
    }

    #[test]
    fn test_payload_passes_validation() {
        let form = MenuForm::from_fields(&fields(&[
            ("name", "Soup"),
            ("price", " 5.50 "),
            ("allergen", "dairy"),
        ]));

        let item = validate_new_item(&form.to_payload()).unwrap();
        assert_eq!(item.name, "Soup");
        assert_eq!(item.description, None);
        assert_eq!(item.price, Decimal::new(550, 2));
        assert_eq!(item.allergens, Allergens::with(&[Allergen::Dairy]));
    }

    #[test]
    fn test_from_item_round_trips_through_payload() {
        let item = stored_soup();
        let form = MenuForm::from_item(&item);

        assert_eq!(form.price, "5.5");
        assert_eq!(form.description, "");

        let again = validate_new_item(&form.to_payload()).unwrap();
        assert_eq!(again.price, item.price);
        assert_eq!(again.allergens, item.allergens);
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut page = PageState::default();
        let accepted = page.accept_draft(MenuForm {
            name: "Soup".to_string(),
            price: "  ".to_string(),
            ..MenuForm::default()
        });

        assert!(!accepted);
        assert_eq!(
            page.status,
            Some(StatusMessage::info("Please fill in all required fields"))
        );
        assert_eq!(page.form.name, "Soup");
    }

    #[test]
    fn test_create_success_resets_form() {
        let mut page = PageState::default();
        assert!(page.accept_draft(MenuForm {
            name: "Soup".to_string(),
            price: "5".to_string(),
            ..MenuForm::default()
        }));

        page.finish_submit(true);

        assert_eq!(page.form, MenuForm::default());
        assert_eq!(page.mode, FormMode::Creating);
        assert_eq!(page.status, Some(StatusMessage::info("Item added successfully")));
    }

    #[test]
    fn test_edit_failure_keeps_draft_and_mode() {
        let item = stored_soup();
        let mut page = PageState::default();
        page.begin_edit(&item);
        assert_eq!(page.heading(), "Edit Menu Item");
        assert_eq!(page.submit_label(), "Update Item");

        page.form.price = "-1".to_string();
        page.finish_submit(false);

        assert_eq!(page.mode, FormMode::Editing(item.id));
        assert_eq!(page.form.price, "-1");
        assert!(page.status.as_ref().unwrap().is_error());
        assert_eq!(page.status.unwrap().text, "Failed to update item");
    }

    #[test]
    fn test_edit_success_returns_to_creating() {
        let mut page = PageState::default();
        page.begin_edit(&stored_soup());

        page.finish_submit(true);

        assert_eq!(page.mode, FormMode::Creating);
        assert_eq!(page.heading(), "Add New Menu Item");
        assert_eq!(page.status.unwrap().text, "Item updated successfully");
    }

    #[test]
    fn test_deleting_edited_item_cancels_edit() {
        let item = stored_soup();
        let mut page = PageState::default();
        page.begin_edit(&item);

        page.finish_delete(MenuItemId::generate(), true);
        assert!(page.is_editing());

        page.finish_delete(item.id, true);
        assert!(!page.is_editing());
        assert_eq!(page.form, MenuForm::default());

        page.finish_delete(item.id, false);
        assert_eq!(page.status, Some(StatusMessage::error("Failed to delete item")));

        page.dismiss_status();
        assert_eq!(page.status, None);
    }
}

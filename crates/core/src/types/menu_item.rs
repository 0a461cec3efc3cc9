//! Menu item records and the validated inputs that create or change them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Allergens, MenuItemId};

/// A stored menu item.
///
/// Serialized with camelCase timestamps and the identifier under `_id`, which
/// is the JSON shape API clients read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Store-assigned identifier. Never changes.
    #[serde(rename = "_id")]
    pub id: MenuItemId,
    /// Display name (non-empty after trimming).
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Price in the menu's currency, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Allergen presence flags.
    pub allergens: Allergens,
    /// Set once when the item is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Merge a validated update into this record.
    ///
    /// Only supplied fields change. Timestamps are left to the caller.
    pub fn apply_update(&mut self, update: MenuItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(allergens) = update.allergens {
            self.allergens = allergens;
        }
    }
}

/// A validated request to create a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub allergens: Allergens,
}

/// A validated partial update.
///
/// `None` means the caller did not supply the field. For `description`,
/// `Some(None)` clears the stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub allergens: Option<Allergens>,
}

impl MenuItemUpdate {
    /// Whether the update supplies no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.allergens.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Allergen;

    fn soup() -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: MenuItemId::generate(),
            name: "Soup".to_string(),
            description: Some("Tomato".to_string()),
            price: Decimal::new(5, 0),
            allergens: Allergens::with(&[Allergen::Dairy]),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_update_only_touches_supplied_fields() {
        let mut item = soup();
        item.apply_update(MenuItemUpdate {
            price: Some(Decimal::new(6, 0)),
            ..MenuItemUpdate::default()
        });

        assert_eq!(item.price, Decimal::new(6, 0));
        assert_eq!(item.name, "Soup");
        assert_eq!(item.description.as_deref(), Some("Tomato"));
        assert!(item.allergens.dairy);
    }

    #[test]
    fn test_apply_update_can_clear_description_and_zero_price() {
        let mut item = soup();
        item.apply_update(MenuItemUpdate {
            description: Some(None),
            price: Some(Decimal::ZERO),
            ..MenuItemUpdate::default()
        });

        assert_eq!(item.description, None);
        assert_eq!(item.price, Decimal::ZERO);
    }

    #[test]
    fn test_json_shape() {
        let item = soup();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["_id"], json!(item.id.to_string()));
        assert_eq!(json["price"], json!(5.0));
        assert_eq!(json["allergens"]["dairy"], json!(true));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_cents() {
        let mut item = soup();
        item.price = Decimal::new(1299, 2);
        let json = serde_json::to_string(&item).unwrap();
        let back: MenuItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, Decimal::new(1299, 2));
    }

    #[test]
    fn test_empty_update() {
        assert!(MenuItemUpdate::default().is_empty());
    }
}

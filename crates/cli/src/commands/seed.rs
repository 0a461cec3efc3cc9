//! Seed the menu with sample items.
//!
//! Items go through the same validation and service path as API requests,
//! so a seeded database never holds anything the API would reject.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use allergen_menu_api::db::PgMenuItemStore;
use allergen_menu_api::services::MenuItemService;
use allergen_menu_core::{MenuItemPayload, NewMenuItem, validate_new_item};

use super::{CommandError, connect};

/// Sample menu, as API request bodies.
fn sample_payloads() -> Vec<Value> {
    vec![
        json!({
            "name": "Margherita Pizza",
            "description": "Tomato, mozzarella and basil on a thin crust",
            "price": 12.5,
            "allergens": {"gluten": true, "dairy": true}
        }),
        json!({
            "name": "Caesar Salad",
            "description": "Romaine, parmesan, croutons and anchovy dressing",
            "price": 9,
            "allergens": {"gluten": true, "dairy": true, "eggs": true, "fish": true}
        }),
        json!({
            "name": "Pad Thai",
            "description": "Rice noodles with prawns, peanuts and tamarind",
            "price": 14,
            "allergens": {"nuts": true, "soy": true, "eggs": true, "shellfish": true}
        }),
        json!({
            "name": "Hummus Plate",
            "description": "Chickpeas, tahini and warm pita",
            "price": 7.25,
            "allergens": {"sesame": true, "gluten": true}
        }),
        json!({
            "name": "Fruit Sorbet",
            "price": 5
        }),
    ]
}

/// Validate every sample before anything is written.
fn sample_items() -> Result<Vec<NewMenuItem>, CommandError> {
    sample_payloads()
        .into_iter()
        .map(|value| -> Result<NewMenuItem, CommandError> {
            let name = value["name"].as_str().unwrap_or_default().to_string();
            let payload: MenuItemPayload = serde_json::from_value(value)?;
            validate_new_item(&payload).map_err(|source| CommandError::InvalidSeed { name, source })
        })
        .collect()
}

/// Insert the sample menu.
///
/// # Arguments
///
/// * `reset` - Delete every existing item first
///
/// # Errors
///
/// Returns an error if a sample is invalid or the database fails.
pub async fn run(reset: bool) -> Result<(), CommandError> {
    let items = sample_items()?;

    let pool = connect().await?;
    let service = MenuItemService::new(Arc::new(PgMenuItemStore::new(pool.clone())));

    if reset {
        let existing = service.list().await?;
        for item in &existing {
            service.delete(item.id).await?;
        }
        info!(deleted = existing.len(), "Cleared existing menu items");
    }

    for item in items {
        let created = service.create(item).await?;
        info!(item_id = %created.id, name = %created.name, "Seeded menu item");
    }

    info!("Seeding complete!");
    pool.close().await;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use allergen_menu_core::Allergen;

    use super::*;

    #[test]
    fn test_samples_are_valid() {
        let items = sample_items().unwrap();
        assert_eq!(items.len(), sample_payloads().len());

        let sorbet = items.iter().find(|i| i.name == "Fruit Sorbet").unwrap();
        assert_eq!(sorbet.description, None);
        assert_eq!(sorbet.allergens.present().count(), 0);

        let pad_thai = items.iter().find(|i| i.name == "Pad Thai").unwrap();
        assert!(pad_thai.allergens.contains(Allergen::Shellfish));
        assert!(!pad_thai.allergens.contains(Allergen::Gluten));
    }
}

//! Print the stored menu.

use std::sync::Arc;

use tracing::info;

use allergen_menu_api::db::PgMenuItemStore;
use allergen_menu_api::services::MenuItemService;
use allergen_menu_core::{Allergen, MenuItem};

use super::{CommandError, connect};

/// One table row for an item.
fn format_row(item: &MenuItem) -> String {
    let allergens: Vec<&str> = item.allergens.present().map(Allergen::label).collect();
    let allergens = if allergens.is_empty() {
        "-".to_string()
    } else {
        allergens.join(", ")
    };

    let price = format!("${:.2}", item.price);
    format!("{:<36}  {:<24}  {price:>8}  {allergens}", item.id, item.name)
}

/// Log every menu item, newest first.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let service = MenuItemService::new(Arc::new(PgMenuItemStore::new(pool.clone())));

    let items = service.list().await?;

    info!("Menu Items ({})", items.len());
    info!("{:<36}  {:<24}  {:>8}  Allergens", "ID", "Name", "Price");
    for item in &items {
        info!("{}", format_row(item));
    }

    pool.close().await;
    Ok(())
}

//! Core types for Allergen Menu.
//!
//! This module provides type-safe wrappers for the menu domain.

pub mod allergen;
pub mod id;
pub mod menu_item;

pub use allergen::{Allergen, Allergens};
pub use id::{MenuItemId, MenuItemIdError};
pub use menu_item::{MenuItem, MenuItemUpdate, NewMenuItem};

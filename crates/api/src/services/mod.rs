//! Business logic services.
//!
//! Services sit between route handlers and the store. They own the
//! record lifecycle (IDs, timestamps, update merging) so handlers only deal
//! with HTTP concerns.

pub mod menu_items;

pub use menu_items::{MenuItemService, ServiceError};

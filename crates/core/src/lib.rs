//! Allergen Menu Core - Shared types and validation.
//!
//! This crate provides the pieces shared by every Allergen Menu component:
//! - `api` - REST API server backed by `PostgreSQL`
//! - `web` - Form-driven web client that talks to the API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Validation lives here so that every caller of the
//! API classifies payloads the same way.
//!
//! # Modules
//!
//! - [`types`] - Menu item records, allergen flags and type-safe IDs
//! - [`validation`] - Payload classification for create and update requests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    MenuItemPayload, ValidationError, validate_item_update, validate_new_item,
};

//! Payload validation for menu item requests.
//!
//! Request bodies are deserialized into [`MenuItemPayload`], which keeps every
//! field as raw JSON so the rules below see exactly what the caller sent. A
//! successful validation yields the typed [`NewMenuItem`] or
//! [`MenuItemUpdate`]; nothing else is allowed to construct them from user
//! input.
//!
//! # Rules
//!
//! 1. `name` must be a string that is non-empty after trimming.
//! 2. `price` must be a JSON number or numeric string, and `>= 0`.
//! 3. `description`, when given, must be a string.
//! 4. `allergens`, when given, must be an object whose keys are recognised
//!    allergens with boolean values.
//!
//! The first failing rule wins. Absent and `null` fields are treated the same.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{Allergens, MenuItemUpdate, NewMenuItem};

/// A create or update request body before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Value>,
}

/// Reasons a payload is rejected.
///
/// The `Display` output is the message returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Valid price is required")]
    InvalidPrice,

    #[error("Description must be text")]
    InvalidDescription,

    #[error("Invalid allergens format")]
    InvalidAllergens {
        /// Offending allergen keys, sorted.
        invalid_fields: Vec<String>,
    },
}

impl ValidationError {
    /// Offending field names, for errors that carry them.
    #[must_use]
    pub fn invalid_fields(&self) -> Option<&[String]> {
        match self {
            Self::InvalidAllergens { invalid_fields } => Some(invalid_fields),
            _ => None,
        }
    }
}

/// Validate a create request.
///
/// # Errors
///
/// Returns the first rule the payload breaks.
pub fn validate_new_item(payload: &MenuItemPayload) -> Result<NewMenuItem, ValidationError> {
    let name = parse_name(payload.name.as_ref())?;
    let price = parse_price(payload.price.as_ref())?;
    let description = parse_description(payload.description.as_ref())?.flatten();
    let allergens = parse_allergens(payload.allergens.as_ref())?.unwrap_or_default();

    Ok(NewMenuItem {
        name,
        description,
        price,
        allergens,
    })
}

/// Validate a partial update request.
///
/// Only supplied fields are checked, each with the same rule as on create.
///
/// # Errors
///
/// Returns the first rule a supplied field breaks.
pub fn validate_item_update(payload: &MenuItemPayload) -> Result<MenuItemUpdate, ValidationError> {
    let name = payload
        .name
        .as_ref()
        .map(|value| parse_name(Some(value)))
        .transpose()?;
    let price = payload
        .price
        .as_ref()
        .map(|value| parse_price(Some(value)))
        .transpose()?;
    let description = parse_description(payload.description.as_ref())?;
    let allergens = parse_allergens(payload.allergens.as_ref())?;

    Ok(MenuItemUpdate {
        name,
        description,
        price,
        allergens,
    })
}

fn parse_name(value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ValidationError::NameRequired),
    }
}

/// Prices must fit in a [`Decimal`] (magnitude below about 7.9e28); larger
/// numbers are reported as an invalid price.
fn parse_price(value: Option<&Value>) -> Result<Decimal, ValidationError> {
    let price = match value {
        Some(Value::Number(n)) => n.as_f64().and_then(Decimal::from_f64),
        Some(Value::String(s)) => parse_numeric_str(s),
        _ => None,
    };

    match price {
        Some(price) if !price.is_sign_negative() || price.is_zero() => Ok(price.normalize()),
        _ => Err(ValidationError::InvalidPrice),
    }
}

/// Parse a price typed into a text field, e.g. `"12.50"` or `" 3 "`.
fn parse_numeric_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s).ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(Decimal::from_f64)
    })
}

/// `Ok(None)` when absent, `Ok(Some(None))` when explicitly empty.
fn parse_description(value: Option<&Value>) -> Result<Option<Option<String>>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(ValidationError::InvalidDescription),
    }
}

fn parse_allergens(value: Option<&Value>) -> Result<Option<Allergens>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::Object(map)) => Allergens::from_json_map(map)
            .map(Some)
            .map_err(|invalid_fields| ValidationError::InvalidAllergens { invalid_fields }),
        Some(_) => Err(ValidationError::InvalidAllergens {
            invalid_fields: vec!["allergens".to_string()],
        }),
    }
}

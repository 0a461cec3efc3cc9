//! Newtype ID for menu item references.
//!
//! Menu item IDs are opaque to callers. The store assigns them at creation and
//! clients only ever echo them back in request paths.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a path segment is not a valid menu item ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid menu item id: {0}")]
pub struct MenuItemIdError(String);

/// Unique identifier of a menu item.
///
/// Wraps a UUID and implements:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `FromStr` for parsing request path segments
/// - `sqlx` `Type`, `Encode`, and `Decode` (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use allergen_menu_core::MenuItemId;
/// let id = MenuItemId::generate();
/// let parsed: MenuItemId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
///
/// assert!("not-an-id".parse::<MenuItemId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(Uuid);

impl MenuItemId {
    /// Create an ID from an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MenuItemId {
    type Err = MenuItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| MenuItemIdError(s.to_string()))
    }
}

impl From<Uuid> for MenuItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for Uuid {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for MenuItemId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MenuItemId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for MenuItemId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_surrounding_whitespace() {
        let id = MenuItemId::generate();
        let parsed: MenuItemId = format!(" {id} ").parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_mongo_style_object_id() {
        let err = "64b7f0c2e4b0a1a2b3c4d5e6".parse::<MenuItemId>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid menu item id: 64b7f0c2e4b0a1a2b3c4d5e6"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = MenuItemId::new(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}

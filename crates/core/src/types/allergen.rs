//! Allergen flags attached to every menu item.
//!
//! The set of recognised allergens is closed. [`Allergens`] stores one boolean
//! per allergen, so an unknown key can never reach storage. Request payloads
//! still arrive as open JSON objects; [`Allergens::from_json_map`] turns them
//! into the fixed record and reports every key that does not fit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recognised allergen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allergen {
    Gluten,
    Dairy,
    Nuts,
    Eggs,
    Soy,
    Shellfish,
    Fish,
    Sesame,
}

impl Allergen {
    /// Every allergen, in display order.
    pub const ALL: [Self; 8] = [
        Self::Gluten,
        Self::Dairy,
        Self::Nuts,
        Self::Eggs,
        Self::Soy,
        Self::Shellfish,
        Self::Fish,
        Self::Sesame,
    ];

    /// JSON key and form field name (e.g. `shellfish`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gluten => "gluten",
            Self::Dairy => "dairy",
            Self::Nuts => "nuts",
            Self::Eggs => "eggs",
            Self::Soy => "soy",
            Self::Shellfish => "shellfish",
            Self::Fish => "fish",
            Self::Sesame => "sesame",
        }
    }

    /// Human-readable label (e.g. `Shellfish`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gluten => "Gluten",
            Self::Dairy => "Dairy",
            Self::Nuts => "Nuts",
            Self::Eggs => "Eggs",
            Self::Soy => "Soy",
            Self::Shellfish => "Shellfish",
            Self::Fish => "Fish",
            Self::Sesame => "Sesame",
        }
    }

    /// Look up an allergen by its exact JSON key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Allergen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| s.to_string())
    }
}

/// Presence flags for every recognised allergen.
///
/// Missing keys deserialize as `false`; unknown keys are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct Allergens {
    pub gluten: bool,
    pub dairy: bool,
    pub nuts: bool,
    pub eggs: bool,
    pub soy: bool,
    pub shellfish: bool,
    pub fish: bool,
    pub sesame: bool,
}

impl Allergens {
    /// No allergens present.
    pub const NONE: Self = Self {
        gluten: false,
        dairy: false,
        nuts: false,
        eggs: false,
        soy: false,
        shellfish: false,
        fish: false,
        sesame: false,
    };

    /// Build a record with exactly the given allergens present.
    #[must_use]
    pub fn with(allergens: &[Allergen]) -> Self {
        let mut record = Self::NONE;
        for allergen in allergens {
            record.set(*allergen, true);
        }
        record
    }

    /// Whether the given allergen is flagged.
    #[must_use]
    pub const fn contains(&self, allergen: Allergen) -> bool {
        match allergen {
            Allergen::Gluten => self.gluten,
            Allergen::Dairy => self.dairy,
            Allergen::Nuts => self.nuts,
            Allergen::Eggs => self.eggs,
            Allergen::Soy => self.soy,
            Allergen::Shellfish => self.shellfish,
            Allergen::Fish => self.fish,
            Allergen::Sesame => self.sesame,
        }
    }

    /// Set the flag for one allergen.
    pub fn set(&mut self, allergen: Allergen, present: bool) {
        let flag = match allergen {
            Allergen::Gluten => &mut self.gluten,
            Allergen::Dairy => &mut self.dairy,
            Allergen::Nuts => &mut self.nuts,
            Allergen::Eggs => &mut self.eggs,
            Allergen::Soy => &mut self.soy,
            Allergen::Shellfish => &mut self.shellfish,
            Allergen::Fish => &mut self.fish,
            Allergen::Sesame => &mut self.sesame,
        };
        *flag = present;
    }

    /// Allergens currently flagged, in display order.
    pub fn present(&self) -> impl Iterator<Item = Allergen> + '_ {
        Allergen::ALL.into_iter().filter(|a| self.contains(*a))
    }

    /// Parse an open JSON object into the fixed record.
    ///
    /// Keys that are not recognised allergens, and recognised keys whose value
    /// is not a JSON boolean, are all collected and returned together.
    ///
    /// # Errors
    ///
    /// Returns the offending keys (sorted by key) if any entry is invalid.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, Vec<String>> {
        let mut record = Self::NONE;
        let mut invalid = Vec::new();

        for (key, value) in map {
            match (Allergen::from_key(key), value) {
                (Some(allergen), Value::Bool(present)) => record.set(allergen, *present),
                _ => invalid.push(key.clone()),
            }
        }

        if invalid.is_empty() {
            Ok(record)
        } else {
            invalid.sort();
            Err(invalid)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_json_map_accepts_partial_object() {
        let allergens = Allergens::from_json_map(&as_map(json!({"dairy": true}))).unwrap();
        assert!(allergens.dairy);
        assert_eq!(allergens.present().collect::<Vec<_>>(), vec![Allergen::Dairy]);
    }

    #[test]
    fn test_from_json_map_false_values_stay_false() {
        let allergens =
            Allergens::from_json_map(&as_map(json!({"nuts": false, "soy": true}))).unwrap();
        assert!(!allergens.nuts);
        assert!(allergens.soy);
    }

    #[test]
    fn test_from_json_map_reports_unknown_and_non_boolean_keys() {
        let err = Allergens::from_json_map(&as_map(json!({
            "peanuts": true,
            "gluten": "yes",
            "fish": true,
            "celery": false
        })))
        .unwrap_err();
        assert_eq!(err, vec!["celery", "gluten", "peanuts"]);
    }

    #[test]
    fn test_key_lookup_is_case_sensitive() {
        assert_eq!(Allergen::from_key("sesame"), Some(Allergen::Sesame));
        assert_eq!(Allergen::from_key("Sesame"), None);
    }

    #[test]
    fn test_serializes_all_keys() {
        let json = serde_json::to_value(Allergens::with(&[Allergen::Fish])).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), Allergen::ALL.len());
        assert_eq!(map["fish"], json!(true));
        assert_eq!(map["gluten"], json!(false));
    }

    #[test]
    fn test_deserialize_rejects_unknown_key() {
        let result: Result<Allergens, _> = serde_json::from_value(json!({"mustard": true}));
        assert!(result.is_err());
    }
}

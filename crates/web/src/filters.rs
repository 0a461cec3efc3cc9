//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as dollars with two decimals.
///
/// Usage in templates: `{{ item.price|price }}` renders `$5.00`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn price(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_price(&value.to_string()))
}

/// Upper-cases the first character.
///
/// Usage in templates: `{{ allergen|capitalize }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn capitalize(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(capitalize_first(&value.to_string()))
}

fn format_price(raw: &str) -> String {
    Decimal::from_str(raw.trim()).map_or_else(
        |_| format!("${raw}"),
        |amount| {
            let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("${cents:.2}")
        },
    )
}

fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("5"), "$5.00");
        assert_eq!(format_price("5.5"), "$5.50");
        assert_eq!(format_price("12.345"), "$12.35");
        assert_eq!(format_price("0"), "$0.00");
        assert_eq!(format_price("n/a"), "$n/a");
    }

    #[test]
    fn test_format_price_rounds_half_cents_up() {
        assert_eq!(format_price("0.125"), "$0.13");
        assert_eq!(format_price("1.005"), "$1.01");
        assert_eq!(format_price("2.675"), "$2.68");
        assert_eq!(format_price("4.994"), "$4.99");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("shellfish"), "Shellfish");
        assert_eq!(capitalize_first("Soy"), "Soy");
        assert_eq!(capitalize_first(""), "");
    }
}

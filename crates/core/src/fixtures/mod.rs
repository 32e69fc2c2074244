//! Fixtures
//!
//! YAML loaders for catalogs and promotion rules.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::catalog::CatalogError;

pub mod products;
pub mod rules;

pub use products::{CatalogFixture, load_catalog, parse_catalog};
pub use rules::{RulesFixture, load_rules, parse_rules};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Catalog construction error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Parse a non-negative price string (e.g., "35.99").
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal or is negative.
pub fn parse_price(s: &str) -> Result<Decimal, FixtureError> {
    let price = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if price < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    Ok(price)
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let parsed = if let Some(percent_str) = trimmed.strip_suffix('%') {
        // "15%" -> 0.15
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    };

    let value = parsed.ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))?;

    if value < Decimal::ZERO {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_accepts_decimal() -> TestResult {
        assert_eq!(parse_price("35.99")?, Decimal::new(35_99, 2));
        assert_eq!(parse_price(" 0 ")?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("35.99USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative() {
        let result = parse_price("-1.00");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_percentage_formats_agree() -> TestResult {
        let from_percent = parse_percentage("15%")?;
        let from_decimal = parse_percentage("0.15")?;

        assert_eq!(from_percent, from_decimal);
        assert_eq!(from_percent * Decimal::ONE, Decimal::new(15, 2));

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_percentage("lots"),
            Err(FixtureError::InvalidPercentage(_))
        ));
        assert!(matches!(
            parse_percentage("-5%"),
            Err(FixtureError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn parse_currency_rejects_unknown_currency() {
        let result = parse_currency("ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }
}

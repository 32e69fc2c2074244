//! Promotion Rule Fixtures

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_percentage},
    promotions::{CheapestItemFree, PercentageOff, PricingRules},
};

/// Promotion rules in YAML. Omitted sections keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RulesFixture {
    /// Quantity-threshold rule
    pub cheapest_item_free: Option<CheapestItemFreeFixture>,

    /// Tier rule
    pub percentage_off: Option<PercentageOffFixture>,
}

/// Cheapest Item Free Fixture
#[derive(Debug, Deserialize)]
pub struct CheapestItemFreeFixture {
    /// Units required before the promotion applies
    pub min_quantity: u64,
}

/// Percentage Off Fixture
#[derive(Debug, Deserialize)]
pub struct PercentageOffFixture {
    /// Rate (e.g., "15%" or "0.15")
    pub rate: String,
}

impl TryFrom<RulesFixture> for PricingRules {
    type Error = FixtureError;

    fn try_from(fixture: RulesFixture) -> Result<Self, Self::Error> {
        let cheapest_item_free = fixture
            .cheapest_item_free
            .map_or_else(CheapestItemFree::default, |rule| {
                CheapestItemFree::new(rule.min_quantity)
            });

        let percentage_off = match fixture.percentage_off {
            Some(rule) => PercentageOff::new(parse_percentage(&rule.rate)?),
            None => PercentageOff::default(),
        };

        Ok(PricingRules {
            cheapest_item_free,
            percentage_off,
        })
    }
}

/// Parse promotion rules from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or a rate is invalid.
pub fn parse_rules(yaml: &str) -> Result<PricingRules, FixtureError> {
    let fixture: RulesFixture = serde_norway::from_str(yaml)?;

    PricingRules::try_from(fixture)
}

/// Load promotion rules from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_rules(path: impl AsRef<Path>) -> Result<PricingRules, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_rules(&contents)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn full_rules_are_read() -> TestResult {
        let yaml = r#"
cheapest_item_free:
  min_quantity: 4
percentage_off:
  rate: "20%"
"#;

        let rules = parse_rules(yaml)?;

        assert_eq!(rules.cheapest_item_free.min_quantity(), 4);
        assert_eq!(rules.percentage_off.amount(Decimal::new(100, 0))?, Decimal::new(20, 0));

        Ok(())
    }

    #[test]
    fn omitted_sections_keep_defaults() -> TestResult {
        let yaml = r#"
percentage_off:
  rate: "0.10"
"#;

        let rules = parse_rules(yaml)?;

        assert_eq!(rules.cheapest_item_free, CheapestItemFree::default());
        assert_eq!(rules.percentage_off.amount(Decimal::new(50, 0))?, Decimal::new(5, 0));

        Ok(())
    }

    #[test]
    fn invalid_rate_is_rejected() {
        let yaml = r#"
percentage_off:
  rate: "plenty"
"#;

        assert!(matches!(parse_rules(yaml), Err(FixtureError::InvalidPercentage(_))));
    }
}

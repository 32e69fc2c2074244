//! Cart operations given on the command line, e.g. `add:1` or `set:2=4`.

use std::str::FromStr;

use tally::{cart::UpdateDirection, products::ProductId, tiers::CustomerTier};
use thiserror::Error;

use crate::domain::{
    carts::{CartUpdate, CartsService, CartsServiceError},
    sessions::SessionId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationParseError {
    #[error("expected <operation>:<argument>, got `{0}`")]
    Malformed(String),

    #[error("unknown operation `{0}` (expected add, inc, dec, set, remove or tier)")]
    UnknownOperation(String),

    #[error("invalid product id `{0}`")]
    InvalidProduct(String),

    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),

    #[error("unknown tier `{0}` (expected vip or common)")]
    UnknownTier(String),
}

/// One change to a session's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Set(ProductId, i64),
    Remove(ProductId),
    Tier(CustomerTier),
}

impl CartOperation {
    /// Run the operation against `session`.
    ///
    /// # Errors
    ///
    /// Propagates service errors; lookups that miss are reported in the outcome.
    pub async fn apply(
        self,
        carts: &dyn CartsService,
        session: SessionId,
    ) -> Result<CartUpdate, CartsServiceError> {
        match self {
            Self::Add(product) => carts.add_item(session, product).await,
            Self::Increase(product) => {
                carts
                    .update_item_quantity(session, product, UpdateDirection::Increase)
                    .await
            }
            Self::Decrease(product) => {
                carts
                    .update_item_quantity(session, product, UpdateDirection::Decrease)
                    .await
            }
            Self::Set(product, quantity) => {
                carts.set_item_quantity(session, product, quantity).await
            }
            Self::Remove(product) => carts.remove_item(session, product).await,
            Self::Tier(tier) => carts.set_customer_tier(session, tier).await,
        }
    }
}

impl FromStr for CartOperation {
    type Err = OperationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (operation, argument) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| OperationParseError::Malformed(s.to_string()))?;

        match operation.to_ascii_lowercase().as_str() {
            "add" => parse_product(argument).map(Self::Add),
            "inc" => parse_product(argument).map(Self::Increase),
            "dec" => parse_product(argument).map(Self::Decrease),
            "remove" => parse_product(argument).map(Self::Remove),
            "set" => {
                let (product, quantity) = argument
                    .split_once('=')
                    .ok_or_else(|| OperationParseError::Malformed(s.to_string()))?;

                let quantity = quantity
                    .trim()
                    .parse::<i64>()
                    .map_err(|_err| OperationParseError::InvalidQuantity(quantity.to_string()))?;

                Ok(Self::Set(parse_product(product)?, quantity))
            }
            "tier" => parse_tier(argument).map(Self::Tier),
            other => Err(OperationParseError::UnknownOperation(other.to_string())),
        }
    }
}

fn parse_product(s: &str) -> Result<ProductId, OperationParseError> {
    s.parse()
        .map_err(|_err| OperationParseError::InvalidProduct(s.to_string()))
}

fn parse_tier(s: &str) -> Result<CustomerTier, OperationParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "vip" | "preferred" => Ok(CustomerTier::Preferred),
        "common" | "standard" => Ok(CustomerTier::Standard),
        _ => Err(OperationParseError::UnknownTier(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use tally::cart::Cart;
    use testresult::TestResult;

    use crate::domain::carts::{CartOutcome, MockCartsService};

    use super::*;

    #[test]
    fn parses_every_operation() -> TestResult {
        let id = ProductId::new(2);

        assert_eq!("add:2".parse::<CartOperation>()?, CartOperation::Add(id));
        assert_eq!("inc:2".parse::<CartOperation>()?, CartOperation::Increase(id));
        assert_eq!("DEC: 2".parse::<CartOperation>()?, CartOperation::Decrease(id));
        assert_eq!("set:2=-1".parse::<CartOperation>()?, CartOperation::Set(id, -1));
        assert_eq!("remove:2".parse::<CartOperation>()?, CartOperation::Remove(id));
        assert_eq!(
            "tier:VIP".parse::<CartOperation>()?,
            CartOperation::Tier(CustomerTier::Preferred)
        );
        assert_eq!(
            "tier:common".parse::<CartOperation>()?,
            CartOperation::Tier(CustomerTier::Standard)
        );

        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            "add".parse::<CartOperation>(),
            Err(OperationParseError::Malformed(_))
        ));
        assert!(matches!(
            "buy:1".parse::<CartOperation>(),
            Err(OperationParseError::UnknownOperation(op)) if op == "buy"
        ));
        assert!(matches!(
            "add:shirt".parse::<CartOperation>(),
            Err(OperationParseError::InvalidProduct(_))
        ));
        assert!(matches!(
            "set:1".parse::<CartOperation>(),
            Err(OperationParseError::Malformed(_))
        ));
        assert!(matches!(
            "set:1=lots".parse::<CartOperation>(),
            Err(OperationParseError::InvalidQuantity(_))
        ));
        assert!(matches!(
            "tier:gold".parse::<CartOperation>(),
            Err(OperationParseError::UnknownTier(_))
        ));
    }

    #[tokio::test]
    async fn decrease_dispatches_to_quantity_update() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .withf(|_, product, direction| {
                *product == ProductId::new(3) && *direction == UpdateDirection::Decrease
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(CartUpdate {
                    outcome: CartOutcome::ItemRemoved,
                    cart: Cart::new(),
                })
            });

        let update = CartOperation::Decrease(ProductId::new(3))
            .apply(&carts, SessionId::new())
            .await?;

        assert_eq!(update.outcome, CartOutcome::ItemRemoved);

        Ok(())
    }

    #[tokio::test]
    async fn tier_dispatches_to_customer_tier() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_set_customer_tier()
            .withf(|_, tier| *tier == CustomerTier::Preferred)
            .times(1)
            .returning(|_, tier| {
                Ok(CartUpdate {
                    outcome: CartOutcome::TierUpdated(tier),
                    cart: Cart::new(),
                })
            });

        let update = CartOperation::Tier(CustomerTier::Preferred)
            .apply(&carts, SessionId::new())
            .await?;

        assert_eq!(update.outcome.to_string(), "User tier updated to VIP");

        Ok(())
    }
}

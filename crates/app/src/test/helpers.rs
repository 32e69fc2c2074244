//! Test Helpers

use tally::products::ProductId;

use crate::{
    domain::carts::{CartUpdate, CartsService, CartsServiceError, CartOutcome},
    test::TestContext,
};

/// Add `times` units of `product` to the context session, returning the last update.
pub(crate) async fn add_times(
    ctx: &TestContext,
    product: ProductId,
    times: usize,
) -> Result<CartUpdate, CartsServiceError> {
    let mut update = CartUpdate {
        outcome: CartOutcome::ItemNotFound,
        cart: ctx.carts.get_cart(ctx.session).await?,
    };

    for _ in 0..times {
        update = ctx.carts.add_item(ctx.session, product).await?;
    }

    Ok(update)
}

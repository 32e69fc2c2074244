//! Checkout Example
//!
//! Adds one unit per product id given on the command line and prints the
//! resulting totals.
//!
//! Use `--catalog` to load a catalog YAML file instead of the demo catalog
//! Use `--rules` to load promotion rules from a YAML file
//! Use `--preferred` to price the cart for a VIP customer
//!
//! `cargo run -p tally --example checkout -- --preferred 3 3`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rusty_money::Money;

use tally::{
    fixtures::{load_catalog, load_rules},
    prelude::*,
};

/// Checkout Example
#[derive(Debug, Parser)]
struct CheckoutArgs {
    /// Catalog YAML file
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Promotion rules YAML file
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Price the cart for a VIP customer
    #[arg(long)]
    preferred: bool,

    /// Product ids, one unit each
    #[arg(required = true)]
    products: Vec<ProductId>,
}

/// Checkout Receipt Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::sample(),
    };

    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => PricingRules::default(),
    };

    let engine = PricingEngine::new(rules);
    let tier = CustomerTier::from(args.preferred);
    let currency = catalog.currency();

    let mut cart = Cart::new();

    for &id in &args.products {
        let product = catalog
            .get(id)
            .with_context(|| format!("product {id} is not in the catalog"))?;

        cart = engine.add_item(Some(&cart), product, tier)?;
    }

    for item in cart.items() {
        println!(
            "{:>3} x {:<12} {}",
            item.quantity(),
            item.name(),
            Money::from_decimal(item.line_total()?, currency)
        );
    }

    println!();
    println!("Customer:  {tier}");
    println!("Subtotal:  {}", Money::from_decimal(cart.subtotal(), currency));
    println!(
        "Discount:  {} ({})",
        Money::from_decimal(cart.discount(), currency),
        cart.discount_kind()
    );
    println!("Total:     {}", Money::from_decimal(cart.total(), currency));

    Ok(())
}

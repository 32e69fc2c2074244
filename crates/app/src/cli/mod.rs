//! Command line interface

use std::io;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tally::tiers::CustomerTier;
use tracing::{info, warn};

use crate::{
    config::{CatalogConfig, LoggingConfig},
    context::AppContext,
    domain::sessions::SessionId,
};

pub mod operations;
pub mod render;

pub use operations::{CartOperation, OperationParseError};

/// Tally cart pricing CLI
#[derive(Debug, Parser)]
#[command(name = "tally-app", about = "Tally cart pricing CLI", long_about = None)]
pub struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Catalog and promotion rule sources.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if arguments cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the catalog
    Products,

    /// Apply cart operations to a fresh session and print the priced cart
    Quote(QuoteArgs),
}

/// Quote output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Start the session as a VIP customer
    #[arg(long)]
    pub preferred: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Operations applied in order: add:<id>, inc:<id>, dec:<id>, set:<id>=<qty>,
    /// remove:<id>, tier:vip|common
    #[arg(required = true, value_name = "OPERATION")]
    pub operations: Vec<CartOperation>,
}

/// Execute `command`, writing results to `out`.
///
/// # Errors
///
/// Returns an error if a service call fails or output cannot be written.
pub async fn run(
    command: &Commands,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Products => {
            let products = ctx.products.list_products().await?;

            render::write_products(out, &products, ctx.currency)?;
        }
        Commands::Quote(args) => quote(args, ctx, out).await?,
    }

    Ok(())
}

async fn quote(args: &QuoteArgs, ctx: &AppContext, out: &mut impl io::Write) -> anyhow::Result<()> {
    let session = SessionId::new();

    if args.preferred {
        ctx.carts
            .set_customer_tier(session, CustomerTier::Preferred)
            .await?;
    }

    let mut outcomes = Vec::with_capacity(args.operations.len());

    for operation in &args.operations {
        let update = operation.apply(ctx.carts.as_ref(), session).await?;

        if update.outcome.is_applied() {
            info!(?operation, outcome = %update.outcome, "applied operation");
        } else {
            warn!(?operation, outcome = %update.outcome, "operation skipped");
        }

        outcomes.push(update.outcome);
    }

    let cart = ctx.carts.get_cart(session).await?;

    match args.format {
        OutputFormat::Table => render::write_cart(out, &cart, ctx.currency)?,
        OutputFormat::Json => render::write_cart_json(out, &outcomes, &cart)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tally::{catalog::Catalog, promotions::PricingRules};
    use testresult::TestResult;

    use super::*;

    fn context() -> AppContext {
        AppContext::new(Catalog::sample(), PricingRules::default())
    }

    async fn run_args(args: &[&str]) -> TestResult<String> {
        let cli = Cli::try_parse_from(args.iter().copied())?;
        let mut out = Vec::new();

        run(&cli.command, &context(), &mut out).await?;

        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn products_lists_catalog() -> TestResult {
        let text = run_args(&["tally-app", "products"]).await?;

        assert!(text.contains("T-shirt"));
        assert!(text.contains("Jeans"));
        assert!(text.contains("$80.75"));

        Ok(())
    }

    #[tokio::test]
    async fn quote_applies_operations_in_order() -> TestResult {
        let text = run_args(&[
            "tally-app", "quote", "add:1", "add:1", "add:2", "inc:2", "dec:1",
        ])
        .await?;

        assert!(text.contains("Subtotal: $166.99"));
        assert!(text.contains("Discount: -$35.99 (cheapest item free)"));
        assert!(text.contains("Total:    $131.00"));

        Ok(())
    }

    #[tokio::test]
    async fn preferred_quote_as_json() -> TestResult {
        let text = run_args(&[
            "tally-app",
            "quote",
            "--preferred",
            "--format",
            "json",
            "add:3",
            "add:3",
            "add:9",
        ])
        .await?;

        let value: serde_json::Value = serde_json::from_str(&text)?;

        assert_eq!(value["outcomes"][2], "Product not found");
        assert_eq!(value["cart"]["discount"]["kind"], "percentage_off");

        Ok(())
    }

    #[tokio::test]
    async fn setting_zero_after_tier_change_empties_cart() -> TestResult {
        let text = run_args(&[
            "tally-app", "quote", "add:3", "add:3", "tier:vip", "set:3=0",
        ])
        .await?;

        assert_eq!(text, "Cart is empty\n");

        Ok(())
    }

    #[test]
    fn quote_requires_operations() {
        assert!(Cli::try_parse_from(["tally-app", "quote"]).is_err());
    }

    #[test]
    fn quote_rejects_unparseable_operation() {
        assert!(Cli::try_parse_from(["tally-app", "quote", "buy:1"]).is_err());
    }
}
